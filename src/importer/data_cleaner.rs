// ==========================================
// Tire registry - data cleaner
// ==========================================
// TRIM / length caps / lenient numbers / date normalization
// Input: raw cell of a resolved column (None = column absent)
// ==========================================

use crate::domain::import::CellValue;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// Day zero of spreadsheet serial dates
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Generic textual date layouts tried after DD/MM/YYYY
///
/// Slash dates that are not zero-padded DD/MM/YYYY read month first;
/// month names are English, full or abbreviated.
const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%a %b %d %Y",
];
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
];
/// Day-first layouts for a zero-padded DD/MM/YYYY date followed by a time
const DAY_FIRST_DATETIME_FORMATS: [&str; 2] = ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"];

pub struct DataCleaner;

impl DataCleaner {
    /// Trimmed text of a cell (numbers without trailing ".0")
    pub fn text(&self, cell: &CellValue) -> String {
        cell.as_text().trim().to_string()
    }

    /// Trimmed text, None when the column is absent
    pub fn optional_text(&self, cell: Option<&CellValue>) -> Option<String> {
        cell.map(|c| self.text(c))
    }

    /// Trimmed text capped to `max_chars`, None when the column is absent
    pub fn capped_text(&self, cell: Option<&CellValue>, max_chars: usize) -> Option<String> {
        cell.map(|c| self.cap(&self.text(c), max_chars))
    }

    /// Keep at most `max_chars` characters
    pub fn cap(&self, value: &str, max_chars: usize) -> String {
        value.chars().take(max_chars).collect()
    }

    /// Lenient float: leading numeric prefix, 0 when nothing parses,
    /// None when the column is absent
    pub fn number_or_zero(&self, cell: Option<&CellValue>) -> Option<f64> {
        cell.map(|c| match c {
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Number(_) | CellValue::Empty => 0.0,
            CellValue::Text(s) => parse_float_prefix(s).unwrap_or(0.0),
        })
    }

    /// Normalize a date cell
    ///
    /// - number: serial day count from 1899-12-30
    /// - "DD/MM/YYYY": day/month/year
    /// - other text: numeric text as a serial, then common layouts
    ///
    /// # Returns
    /// - None: column absent, blank cell or unparsable value
    pub fn date(&self, cell: Option<&CellValue>) -> Option<NaiveDate> {
        match cell? {
            CellValue::Empty => None,
            CellValue::Number(n) => serial_to_date(*n),
            CellValue::Text(s) => parse_date_text(s.trim()),
        }
    }
}

/// Spreadsheet serial (days since 1899-12-30, fraction = time of day)
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

fn parse_date_text(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }

    if let Some(date) = parse_dd_mm_yyyy(value) {
        return Some(date);
    }
    if is_dd_mm_yyyy_shape(value) {
        // Right shape but impossible day/month
        return None;
    }
    if value.get(..10).is_some_and(is_dd_mm_yyyy_shape) {
        return DAY_FIRST_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|dt| dt.date());
    }

    if let Ok(serial) = value.parse::<f64>() {
        return serial_to_date(serial);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .or_else(|_| DateTime::parse_from_rfc2822(value))
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Exactly two digits, '/', two digits, '/', four digits
fn is_dd_mm_yyyy_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit())
}

fn parse_dd_mm_yyyy(value: &str) -> Option<NaiveDate> {
    if !is_dd_mm_yyyy_shape(value) {
        return None;
    }
    let day = value[0..2].parse().ok()?;
    let month = value[3..5].parse().ok()?;
    let year = value[6..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Longest leading prefix that reads as a float ("12.5 mm" → 12.5)
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let value = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (idx, c) in value.char_indices() {
        match c {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    value[..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
