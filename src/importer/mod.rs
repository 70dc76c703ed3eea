// ==========================================
// Tire registry - import layer
// ==========================================
// Uploaded spreadsheet → validated registry rows
// Supports: Excel family (calamine), CSV
// ==========================================

pub mod column_map;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod registry_importer_impl;
pub mod registry_importer_trait;
pub mod row_validator;

// Core type re-exports
pub use column_map::{normalize_header, ColumnMap};
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use registry_importer_impl::RegistryImporterImpl;
pub use row_validator::{RowIssue, RowValidation, RowValidator};

// Trait re-exports
pub use registry_importer_trait::{FileParser, RegistryImporter};
