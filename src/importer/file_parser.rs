// ==========================================
// Tire registry - file parsers
// ==========================================
// Excel family (.xlsx/.xlsm/.xlsb/.xls/.ods) via calamine, first sheet
// CSV via csv, first record is the header row
// Input is the in-memory upload, never a path on disk
// ==========================================

use crate::domain::import::{CellValue, ImportRow, ImportSheet, SourceFile};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::registry_importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const UTF8_BOM: char = '\u{feff}';

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, file: &SourceFile) -> ImportResult<ImportSheet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(file.bytes.clone()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::Decode("workbook has no worksheet".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(ImportSheet::default());
        };

        let headers = unique_headers(
            header_row
                .iter()
                .map(|cell| excel_cell_value(cell).as_text())
                .collect(),
        );

        Ok(build_sheet(
            headers,
            rows.map(|row| row.iter().map(excel_cell_value).collect()),
        ))
    }
}

/// Spreadsheet cell → CellValue; dates keep their serial day number
fn excel_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, file: &SourceFile) -> ImportResult<ImportSheet> {
        let text = decode_text(&file.bytes);
        let first_line = text.lines().next().unwrap_or_default();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // rows may be shorter or longer than the header
            .delimiter(detect_delimiter(first_line))
            .from_reader(text.as_bytes());

        let mut records = reader.records();
        let header_record = match records.next() {
            Some(record) => record?,
            None => return Ok(ImportSheet::default()),
        };

        let headers = unique_headers(
            header_record
                .iter()
                .enumerate()
                .map(|(idx, h)| {
                    if idx == 0 {
                        h.trim_start_matches(UTF8_BOM).to_string()
                    } else {
                        h.to_string()
                    }
                })
                .collect(),
        );

        let mut data_rows = Vec::new();
        for record in records {
            let record = record?;
            data_rows.push(
                record
                    .iter()
                    .map(|value| {
                        if value.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::Text(value.to_string())
                        }
                    })
                    .collect(),
            );
        }

        Ok(build_sheet(headers, data_rows.into_iter()))
    }
}

/// UTF-8 when valid, otherwise Windows-1252/Latin-1 as exported by older Excel
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// ';' for locales where ',' is the decimal separator
fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains(';') && !header_line.contains(',') {
        b';'
    } else {
        b','
    }
}

// ==========================================
// Universal parser (format chosen per upload)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Spreadsheet,
    Csv,
}

/// Pick the decoder from the file extension, or from magic bytes when
/// the upload carries no extension
pub fn detect_format(file: &SourceFile) -> ImportResult<SheetFormat> {
    match file.extension().as_deref() {
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods") => Ok(SheetFormat::Spreadsheet),
        Some("csv") => Ok(SheetFormat::Csv),
        Some(other) => Err(ImportError::UnsupportedFormat(other.to_string())),
        None if file.bytes.starts_with(ZIP_MAGIC) || file.bytes.starts_with(OLE_MAGIC) => {
            Ok(SheetFormat::Spreadsheet)
        }
        None => Err(ImportError::UnsupportedFormat("unknown".to_string())),
    }
}

pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse(&self, file: &SourceFile) -> ImportResult<ImportSheet> {
        match detect_format(file)? {
            SheetFormat::Spreadsheet => ExcelParser.parse(file),
            SheetFormat::Csv => CsvParser.parse(file),
        }
    }
}

// ==========================================
// Shared helpers
// ==========================================

/// Name empty headers `__EMPTY`, `__EMPTY_1`, … and suffix repeated ones
/// with `_1`, `_2`, … so every column keeps its own key
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    raw.into_iter()
        .map(|header| {
            let base = if header.trim().is_empty() {
                "__EMPTY".to_string()
            } else {
                header
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// Pair data cells with headers; rows whose cells are all empty are dropped
fn build_sheet<I>(headers: Vec<String>, rows: I) -> ImportSheet
where
    I: Iterator<Item = Vec<CellValue>>,
{
    let rows = rows
        .enumerate()
        .map(|(idx, cells)| {
            let mut row = ImportRow::new(idx + 1);
            for (header, cell) in headers.iter().zip(cells) {
                row.insert(header.clone(), cell);
            }
            row
        })
        .filter(|row| !row.is_blank())
        .collect();

    ImportSheet { headers, rows }
}
