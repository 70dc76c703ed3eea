// ==========================================
// Tire registry - import API
// ==========================================
// Wraps the registry importer: upload in, summary message +
// per-row errors out
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::import::{ImportSummary, RowError, SourceFile};
use crate::i18n;
use crate::importer::{ImportError, RegistryImporter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Import response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// Summary message (all / none / partial)
    pub mensaje: String,
    /// Data rows in the upload
    pub total: usize,
    /// Rows inserted
    pub insertados: usize,
    /// One entry per rejected row, in input order
    pub errores: Vec<RowError>,
}

impl ImportApiResponse {
    pub fn from_summary(summary: &ImportSummary, locale: &str) -> Self {
        Self {
            mensaje: summary_message(summary, locale),
            total: summary.total_rows,
            insertados: summary.inserted_count,
            errores: summary.errors(),
        }
    }
}

/// Summary message; an all-inserted batch wins over "none inserted"
pub fn summary_message(summary: &ImportSummary, locale: &str) -> String {
    if summary.inserted_count == summary.total_rows {
        i18n::t("import.summary.all_inserted", locale)
    } else if summary.inserted_count == 0 {
        i18n::t("import.summary.none_inserted", locale)
    } else {
        i18n::t_with_args(
            "import.summary.partial",
            locale,
            &[
                ("inserted", &summary.inserted_count.to_string()),
                ("total", &summary.total_rows.to_string()),
            ],
        )
    }
}

// ==========================================
// ImportApi
// ==========================================
pub struct ImportApi {
    importer: Arc<dyn RegistryImporter>,
    locale: String,
}

impl ImportApi {
    pub fn new(importer: Arc<dyn RegistryImporter>, locale: impl Into<String>) -> Self {
        Self {
            importer,
            locale: i18n::normalize_locale(&locale.into()).to_string(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Import an uploaded registry file
    ///
    /// # Arguments
    /// - file: the upload, None when the request carried no file
    ///
    /// # Returns
    /// - Ok(ImportApiResponse): batch processed (rows may still be rejected)
    /// - Err(ApiError::BadRequest): missing, empty or unreadable upload
    /// - Err(ApiError::Transport): data store failure before the first row
    #[instrument(skip(self, file))]
    pub async fn import_padron(&self, file: Option<SourceFile>) -> ApiResult<ImportApiResponse> {
        let file = file.ok_or_else(|| self.map_import_error(ImportError::NoFile))?;

        let summary = self
            .importer
            .import(file)
            .await
            .map_err(|e| self.map_import_error(e))?;

        info!(
            total = summary.total_rows,
            inserted = summary.inserted_count,
            "registry upload processed"
        );
        Ok(ImportApiResponse::from_summary(&summary, &self.locale))
    }

    fn map_import_error(&self, err: ImportError) -> ApiError {
        if err.is_batch_abort() {
            ApiError::BadRequest(err.localized(&self.locale))
        } else {
            ApiError::transport(err.localized(&self.locale), &err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::RowOutcome;
    use crate::importer::ImportResult;
    use crate::repository::RepositoryError;
    use async_trait::async_trait;

    fn inserted(n: usize) -> RowOutcome {
        RowOutcome::Inserted {
            row_number: n,
            code: format!("N-{n}"),
            id: n as i64,
        }
    }

    fn rejected(n: usize) -> RowOutcome {
        RowOutcome::Rejected {
            row_number: n,
            code: format!("N-{n}"),
            reason: "Marca no especificada.".to_string(),
        }
    }

    #[test]
    fn test_summary_messages() {
        let all = ImportSummary::from_outcomes(vec![inserted(1), inserted(2)]);
        assert_eq!(
            summary_message(&all, "es"),
            "Padrón actualizado correctamente. Todos los registros fueron insertados."
        );

        let none = ImportSummary::from_outcomes(vec![rejected(1)]);
        assert_eq!(
            summary_message(&none, "es"),
            "Carga no realizada. Todos los registros tienen errores."
        );

        let partial = ImportSummary::from_outcomes(vec![inserted(1), rejected(2), inserted(3)]);
        assert_eq!(
            summary_message(&partial, "es"),
            "Carga parcial: 2 insertados de 3 registros."
        );
    }

    #[test]
    fn test_response_lists_rejected_rows() {
        let summary = ImportSummary::from_outcomes(vec![inserted(1), rejected(2)]);
        let response = ImportApiResponse::from_summary(&summary, "es");

        assert_eq!(response.total, 2);
        assert_eq!(response.insertados, 1);
        assert_eq!(response.errores.len(), 1);
        assert_eq!(response.errores[0].row, "N-2");
    }

    enum Outcome {
        Summary,
        Abort,
        StoreDown,
    }

    struct StubImporter(Outcome);

    #[async_trait]
    impl RegistryImporter for StubImporter {
        async fn import(&self, _file: SourceFile) -> ImportResult<ImportSummary> {
            match self.0 {
                Outcome::Summary => Ok(ImportSummary::from_outcomes(vec![inserted(1)])),
                Outcome::Abort => Err(ImportError::UnrecognizedColumns),
                Outcome::StoreDown => Err(ImportError::Repository(
                    RepositoryError::DatabaseConnectionError("unable to open".to_string()),
                )),
            }
        }
    }

    fn api(outcome: Outcome) -> ImportApi {
        ImportApi::new(Arc::new(StubImporter(outcome)), "es")
    }

    fn upload() -> Option<SourceFile> {
        Some(SourceFile::new(Some("padron.csv".to_string()), b"CODIGO\nN-1\n".to_vec()))
    }

    #[tokio::test]
    async fn test_missing_file_is_bad_request() {
        let err = api(Outcome::Summary).import_padron(None).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "No se recibió ningún archivo."));
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let ok = api(Outcome::Summary).import_padron(upload()).await.unwrap();
        assert_eq!(ok.insertados, 1);

        let err = api(Outcome::Abort).import_padron(upload()).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = api(Outcome::StoreDown).import_padron(upload()).await.unwrap_err();
        match err {
            ApiError::Transport { message, detail } => {
                assert_eq!(message, "Error al procesar el padrón");
                assert!(!detail.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
