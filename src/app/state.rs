// ==========================================
// Tire registry - application state
// ==========================================
// Shared API instances handed to every request
// ==========================================

use crate::api::{ImportApi, TireApi};
use crate::config::AppConfig;
use crate::db::{init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::importer::{RegistryImporterImpl, UniversalFileParser};
use crate::repository::{RegistryImportRepositoryImpl, RepositoryResult, TireRepository};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Application state
///
/// All repositories share one SQLite connection.
pub struct AppState {
    /// Upload size limit in bytes
    pub max_upload_bytes: usize,

    /// Registry upload
    pub import_api: Arc<ImportApi>,

    /// Registry CRUD and counters
    pub tire_api: Arc<TireApi>,
}

impl AppState {
    /// Open the database, bootstrap the schema and wire the APIs
    ///
    /// # Arguments
    /// - config: loaded application configuration
    ///
    /// # Returns
    /// - Err: the database cannot be opened or the schema cannot be created
    pub fn new(config: &AppConfig) -> RepositoryResult<Self> {
        tracing::info!(db_path = %config.db_path, "initializing application state");

        if let Some(parent) = Path::new(&config.db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| anyhow::anyhow!("cannot create {}: {}", parent.display(), e))?;
            }
        }

        let conn = open_sqlite_connection(&config.db_path)?;
        init_schema(&conn)?;
        match read_schema_version(&conn)? {
            Some(v) if v == CURRENT_SCHEMA_VERSION => {}
            other => tracing::warn!(
                found = ?other,
                expected = CURRENT_SCHEMA_VERSION,
                "schema version mismatch"
            ),
        }
        let conn = Arc::new(Mutex::new(conn));

        let import_repo = RegistryImportRepositoryImpl::from_connection(conn.clone());
        let importer = RegistryImporterImpl::new(
            import_repo,
            Box::new(UniversalFileParser),
            config.import.clone(),
            config.locale.as_str(),
        );
        let import_api = Arc::new(ImportApi::new(Arc::new(importer), config.locale.as_str()));

        let tire_repo = Arc::new(TireRepository::from_connection(conn));
        let tire_api = Arc::new(TireApi::new(tire_repo, config.locale.as_str()));

        tracing::info!("application state ready");
        Ok(Self {
            max_upload_bytes: config.max_upload_bytes,
            import_api,
            tire_api,
        })
    }
}
