// ==========================================
// Tire registry - column resolution
// ==========================================
// Canonical field → header actually present in the upload,
// resolved once per import from the header row
// ==========================================

use crate::config::ImportSettings;
use crate::domain::fields::CanonicalField;
use crate::domain::import::{CellValue, ImportRow};
use std::collections::BTreeMap;

/// Normalize a header for matching
///
/// Uppercase, line breaks and tabs read as spaces, whitespace runs
/// collapsed, accents folded (FABRICACIÓN ≡ FABRICACION, DISEÑO ≡ DISENO).
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
        .chars()
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        other => other,
    }
}

// ==========================================
// ColumnMap
// ==========================================
// Each field maps to at most one header (first match in header order);
// fields are resolved independently, so one header may serve two fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<CanonicalField, String>,
}

impl ColumnMap {
    /// Resolve every canonical field against the header row
    ///
    /// # Arguments
    /// - headers: header row, in column order
    /// - settings: matchers per canonical field
    pub fn resolve(headers: &[String], settings: &ImportSettings) -> Self {
        let normalized: Vec<(String, &String)> = headers
            .iter()
            .map(|h| (normalize_header(h), h))
            .collect();

        let columns = CanonicalField::ALL
            .iter()
            .filter_map(|&field| {
                let matchers = settings.matchers_for(field);
                normalized
                    .iter()
                    .find(|(norm, _)| matchers.iter().any(|m| m.matches(norm)))
                    .map(|(_, original)| (field, (*original).clone()))
            })
            .collect();

        Self { columns }
    }

    /// Header resolved for a field, if any
    pub fn header(&self, field: CanonicalField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    /// True when no field resolved at all
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.columns.len()
    }

    /// Cell of a row for a field; None when the field has no column
    pub fn cell<'r>(&self, row: &'r ImportRow, field: CanonicalField) -> Option<&'r CellValue> {
        self.header(field).map(|header| row.get(header))
    }
}
