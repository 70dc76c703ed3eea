// ==========================================
// Tire registry - import domain model
// ==========================================
// ImportRow: one decoded spreadsheet row (header → raw cell)
// RowOutcome / ImportSummary: per-row and aggregate import result
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// SourceFile - uploaded payload
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFile {
    /// Client-side file name, when the upload carried one
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    /// Lowercased extension of the file name
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.as_deref()?.trim();
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

// ==========================================
// CellValue - raw cell content
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Render the cell as text; whole numbers have no fractional part
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ==========================================
// ImportRow - one data row of the uploaded sheet
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportRow {
    /// 1-based data row number (header row excluded)
    pub row_number: usize,
    pub cells: HashMap<String, CellValue>,
}

impl ImportRow {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            cells: HashMap::new(),
        }
    }

    /// Cell under the given header; missing headers read as empty
    pub fn get(&self, header: &str) -> &CellValue {
        self.cells.get(header).unwrap_or(&EMPTY_CELL)
    }

    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        self.cells.insert(header.into(), value);
    }

    /// No cell holds anything; whitespace-only text still counts as content
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|cell| *cell == CellValue::Empty)
    }
}

// ==========================================
// ImportSheet - decoded first sheet
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportSheet {
    /// Header row, in column order
    pub headers: Vec<String>,
    pub rows: Vec<ImportRow>,
}

// ==========================================
// RowOutcome - result of processing one row
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Inserted {
        row_number: usize,
        code: String,
        id: i64,
    },
    Rejected {
        row_number: usize,
        /// Trimmed code, or empty when the row had none
        code: String,
        reason: String,
    },
}

impl RowOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, RowOutcome::Inserted { .. })
    }
}

/// Rejected row as reported to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    #[serde(rename = "fila")]
    pub row: String,
    #[serde(rename = "mensaje")]
    pub message: String,
}

// ==========================================
// ImportSummary - aggregate import result
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub inserted_count: usize,
    /// One outcome per input row, in input order
    pub outcomes: Vec<RowOutcome>,
}

impl ImportSummary {
    pub fn from_outcomes(outcomes: Vec<RowOutcome>) -> Self {
        let inserted_count = outcomes.iter().filter(|o| o.is_inserted()).count();
        Self {
            total_rows: outcomes.len(),
            inserted_count,
            outcomes,
        }
    }

    pub fn rejected_count(&self) -> usize {
        self.total_rows - self.inserted_count
    }

    /// Rejected rows in input order
    pub fn errors(&self) -> Vec<RowError> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                RowOutcome::Rejected { code, reason, .. } => Some(RowError {
                    row: code.clone(),
                    message: reason.clone(),
                }),
                RowOutcome::Inserted { .. } => None,
            })
            .collect()
    }
}
