// ==========================================
// Tire registry - importer traits
// ==========================================
// Interfaces only; implementations live beside this file
// ==========================================

use crate::domain::import::{ImportSheet, ImportSummary, SourceFile};
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// RegistryImporter Trait
// ==========================================
// Implementor: RegistryImporterImpl
#[async_trait]
pub trait RegistryImporter: Send + Sync {
    /// Import an uploaded registry spreadsheet
    ///
    /// # Arguments
    /// - file: uploaded file (name + bytes)
    ///
    /// # Returns
    /// - Ok(ImportSummary): one outcome per data row, in input order
    /// - Err: batch abort (decode / empty / no recognized column)
    ///   or a data store failure before the first row
    ///
    /// # Flow
    /// 1. Decode the first sheet
    /// 2. Resolve canonical columns from the header row
    /// 3. Load reference data and existing codes
    /// 4. Validate and insert rows strictly in order
    async fn import(&self, file: SourceFile) -> ImportResult<ImportSummary>;
}

// ==========================================
// FileParser Trait
// ==========================================
// Implementors: ExcelParser, CsvParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// Decode a payload into the header row and its data rows
    ///
    /// # Returns
    /// - Ok(ImportSheet): blank rows already skipped
    /// - Err(ImportError::Decode): payload is not a readable spreadsheet
    fn parse(&self, file: &SourceFile) -> ImportResult<ImportSheet>;
}
