// ==========================================
// Tire registry - canonical import fields
// ==========================================
// Canonical field: logical import column, independent of the
// header text actually found in the uploaded spreadsheet
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CanonicalField
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalField {
    Code,
    Brand,
    Size,
    TreadDesign,
    RemainingTread,
    PlyRating,
    LoadIndex,
    SpeedRating,
    ManufactureDateCode,
    RequestRef,
    OrderRef,
    Project,
    Cost,
    Supplier,
    PurchaseDate,
    RegistrationDate,
}

impl CanonicalField {
    /// All canonical fields, in resolution order
    pub const ALL: [CanonicalField; 16] = [
        CanonicalField::Code,
        CanonicalField::Brand,
        CanonicalField::Size,
        CanonicalField::TreadDesign,
        CanonicalField::RemainingTread,
        CanonicalField::PlyRating,
        CanonicalField::LoadIndex,
        CanonicalField::SpeedRating,
        CanonicalField::ManufactureDateCode,
        CanonicalField::RequestRef,
        CanonicalField::OrderRef,
        CanonicalField::Project,
        CanonicalField::Cost,
        CanonicalField::Supplier,
        CanonicalField::PurchaseDate,
        CanonicalField::RegistrationDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Code => "CODE",
            CanonicalField::Brand => "BRAND",
            CanonicalField::Size => "SIZE",
            CanonicalField::TreadDesign => "TREAD_DESIGN",
            CanonicalField::RemainingTread => "REMAINING_TREAD",
            CanonicalField::PlyRating => "PLY_RATING",
            CanonicalField::LoadIndex => "LOAD_INDEX",
            CanonicalField::SpeedRating => "SPEED_RATING",
            CanonicalField::ManufactureDateCode => "MANUFACTURE_DATE_CODE",
            CanonicalField::RequestRef => "REQUEST_REF",
            CanonicalField::OrderRef => "ORDER_REF",
            CanonicalField::Project => "PROJECT",
            CanonicalField::Cost => "COST",
            CanonicalField::Supplier => "SUPPLIER",
            CanonicalField::PurchaseDate => "PURCHASE_DATE",
            CanonicalField::RegistrationDate => "REGISTRATION_DATE",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// HeaderMatcher
// ==========================================
// Patterns are compared against the normalized header
// (uppercase, accents folded, whitespace collapsed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pattern", rename_all = "snake_case")]
pub enum HeaderMatcher {
    /// Pattern appears anywhere in the header
    Substring(String),
    /// Pattern equals one whitespace-separated word of the header
    Word(String),
}

impl HeaderMatcher {
    pub fn substring(pattern: &str) -> Self {
        HeaderMatcher::Substring(pattern.to_string())
    }

    pub fn word(pattern: &str) -> Self {
        HeaderMatcher::Word(pattern.to_string())
    }

    /// Whether an already-normalized header satisfies this matcher
    pub fn matches(&self, normalized_header: &str) -> bool {
        match self {
            HeaderMatcher::Substring(pattern) => normalized_header.contains(pattern.as_str()),
            HeaderMatcher::Word(pattern) => normalized_header
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == pattern),
        }
    }
}

/// Matchers configured for one canonical field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatchers {
    pub field: CanonicalField,
    pub matchers: Vec<HeaderMatcher>,
}

impl FieldMatchers {
    pub fn new(field: CanonicalField, matchers: Vec<HeaderMatcher>) -> Self {
        Self { field, matchers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_matcher() {
        let matcher = HeaderMatcher::substring("FECHA COMPRA");
        assert!(matcher.matches("FECHA COMPRA"));
        assert!(matcher.matches("FECHA COMPRA (DD/MM/AAAA)"));
        assert!(!matcher.matches("FECHA REGISTRO"));
    }

    #[test]
    fn test_word_matcher_ignores_longer_words() {
        let matcher = HeaderMatcher::word("PR");
        assert!(matcher.matches("PR"));
        assert!(matcher.matches("PR (LONAS)"));
        assert!(!matcher.matches("PROVEEDOR"));
        assert!(!matcher.matches("PROYECTO"));
    }

    #[test]
    fn test_all_fields_have_distinct_names() {
        let mut names: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CanonicalField::ALL.len());
    }
}
