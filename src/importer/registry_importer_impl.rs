// ==========================================
// Tire registry - registry importer implementation
// ==========================================
// Flow: decode → resolve columns → load references → validate + insert
// Rows are processed strictly in order: a row's duplicate check must
// see every insert made by earlier rows of the same batch.
// ==========================================

use crate::config::ImportSettings;
use crate::domain::import::{ImportSummary, RowOutcome, SourceFile};
use crate::i18n;
use crate::importer::column_map::ColumnMap;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::registry_importer_trait::{FileParser, RegistryImporter};
use crate::importer::row_validator::{combined_message, RowValidation, RowValidator};
use crate::repository::RegistryImportRepository;
use async_trait::async_trait;
use chrono::Local;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RegistryImporterImpl
// ==========================================
pub struct RegistryImporterImpl<R>
where
    R: RegistryImportRepository,
{
    // Data access
    import_repo: R,

    // Decoding
    file_parser: Box<dyn FileParser>,

    // Header matchers + length caps
    settings: ImportSettings,

    // Language of row messages
    locale: String,
}

impl<R> RegistryImporterImpl<R>
where
    R: RegistryImportRepository,
{
    /// # Arguments
    /// - import_repo: registry data access
    /// - file_parser: spreadsheet decoder
    /// - settings: column matchers and field caps
    /// - locale: language of rejection messages
    pub fn new(
        import_repo: R,
        file_parser: Box<dyn FileParser>,
        settings: ImportSettings,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            import_repo,
            file_parser,
            settings,
            locale: i18n::normalize_locale(&locale.into()).to_string(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

#[async_trait]
impl<R> RegistryImporter for RegistryImporterImpl<R>
where
    R: RegistryImportRepository,
{
    #[instrument(skip(self, file), fields(batch_id, file_name))]
    async fn import(&self, file: SourceFile) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        let file_name = file.file_name.clone().unwrap_or_default();
        tracing::Span::current()
            .record("batch_id", batch_id.as_str())
            .record("file_name", file_name.as_str());

        info!(bytes = file.bytes.len(), "registry import started");

        // === Step 1: decode ===
        if file.bytes.is_empty() {
            return Err(ImportError::EmptyFile);
        }
        let sheet = self.file_parser.parse(&file)?;
        if sheet.rows.is_empty() {
            warn!("spreadsheet has no data rows");
            return Err(ImportError::EmptyFile);
        }
        debug!(
            headers = ?sheet.headers,
            rows = sheet.rows.len(),
            "spreadsheet decoded"
        );

        // === Step 2: column resolution ===
        let column_map = ColumnMap::resolve(&sheet.headers, &self.settings);
        if column_map.is_empty() {
            warn!(headers = ?sheet.headers, "no recognized column");
            return Err(ImportError::UnrecognizedColumns);
        }
        info!(
            resolved = column_map.resolved_count(),
            "columns resolved"
        );

        // === Step 3: reference data + existing codes ===
        let references = self.import_repo.load_reference_snapshot().await?;
        let mut known_codes = self.import_repo.list_tire_codes().await?;
        debug!(existing_codes = known_codes.len(), "reference data loaded");

        // === Step 4: validate + insert, in input order ===
        let today = Local::now().date_naive();
        let validator = RowValidator::new(&column_map, &references, &self.settings, today);
        let mut outcomes = Vec::with_capacity(sheet.rows.len());

        for row in &sheet.rows {
            let outcome = match validator.validate(row, &known_codes) {
                RowValidation::Invalid { code, issues } => {
                    let reason = combined_message(&issues, &self.locale);
                    debug!(row_number = row.row_number, code = %code, reason = %reason, "row rejected");
                    RowOutcome::Rejected {
                        row_number: row.row_number,
                        code,
                        reason,
                    }
                }
                RowValidation::Valid(tire) => match self.import_repo.insert_tire(&tire).await {
                    Ok(id) => {
                        known_codes.insert(tire.code.clone());
                        RowOutcome::Inserted {
                            row_number: row.row_number,
                            code: tire.code,
                            id,
                        }
                    }
                    Err(e) => {
                        warn!(row_number = row.row_number, code = %tire.code, error = %e, "insert failed");
                        RowOutcome::Rejected {
                            row_number: row.row_number,
                            code: tire.code,
                            reason: e.to_string(),
                        }
                    }
                },
            };
            outcomes.push(outcome);
        }

        let summary = ImportSummary::from_outcomes(outcomes);
        info!(
            total = summary.total_rows,
            inserted = summary.inserted_count,
            rejected = summary.rejected_count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "registry import finished"
        );

        Ok(summary)
    }
}
