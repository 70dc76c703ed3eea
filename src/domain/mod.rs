// ==========================================
// Tire registry - domain layer
// ==========================================
// Entities and value types of the registry import
// No data access, no HTTP concerns
// ==========================================

pub mod fields;
pub mod import;
pub mod reference;
pub mod tire;

// Core type re-exports
pub use fields::{CanonicalField, FieldMatchers, HeaderMatcher};
pub use import::{CellValue, ImportRow, ImportSheet, ImportSummary, RowError, RowOutcome, SourceFile};
pub use reference::{Brand, ReferenceSnapshot, Size, Supplier, TreadDesign};
pub use tire::{NewTire, TireRecord, TireUpdate};
