// ==========================================
// Tire registry - importer errors
// ==========================================
// Only failures that abort a whole import live here.
// Row-level problems become RowOutcome::Rejected instead.
// ==========================================

use crate::i18n;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Batch-level import error
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Batch abort (client error) =====
    #[error("no file was received")]
    NoFile,

    #[error("the spreadsheet has no data rows")]
    EmptyFile,

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("spreadsheet decoding failed: {0}")]
    Decode(String),

    #[error("no recognized column in the header row")]
    UnrecognizedColumns,

    // ===== Transport (server error) =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ImportError {
    /// Client-caused failure (bad or empty upload) as opposed to a server fault
    pub fn is_batch_abort(&self) -> bool {
        matches!(
            self,
            ImportError::NoFile
                | ImportError::EmptyFile
                | ImportError::UnsupportedFormat(_)
                | ImportError::Decode(_)
                | ImportError::UnrecognizedColumns
        )
    }

    /// User-facing message in the given locale
    pub fn localized(&self, locale: &str) -> String {
        match self {
            ImportError::NoFile => i18n::t("import.no_file", locale),
            ImportError::EmptyFile => i18n::t("import.empty_file", locale),
            ImportError::UnsupportedFormat(format) => {
                i18n::t_with_args("import.unsupported_format", locale, &[("format", format)])
            }
            ImportError::Decode(detail) => {
                i18n::t_with_args("import.decode_failed", locale, &[("detail", detail)])
            }
            ImportError::UnrecognizedColumns => i18n::t("import.unrecognized_columns", locale),
            ImportError::Repository(_) => i18n::t("import.general_failure", locale),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Decode(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::Decode(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_abort_classification() {
        assert!(ImportError::NoFile.is_batch_abort());
        assert!(ImportError::Decode("zip".to_string()).is_batch_abort());
        assert!(!ImportError::Repository(RepositoryError::LockError("x".to_string()))
            .is_batch_abort());
    }

    #[test]
    fn test_localized_messages() {
        assert_eq!(
            ImportError::EmptyFile.localized("es"),
            "El archivo Excel está vacío."
        );
        assert_eq!(
            ImportError::UnrecognizedColumns.localized("es"),
            "El archivo Excel no contiene ninguna columna reconocida."
        );
        assert_eq!(
            ImportError::UnsupportedFormat("pdf".to_string()).localized("en"),
            "Unsupported file format: pdf"
        );
    }
}
