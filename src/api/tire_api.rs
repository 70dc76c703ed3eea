// ==========================================
// Tire registry - registry API
// ==========================================
// List / partial update / delete / counters over po_neumatico
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::tire::{movement, TireRecord, TireUpdate};
use crate::i18n;
use crate::repository::{RepositoryError, TireRepository};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// `{"mensaje": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub mensaje: String,
}

/// `{"cantidad": n}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountResponse {
    pub cantidad: i64,
}

// ==========================================
// TireApi
// ==========================================
pub struct TireApi {
    tire_repo: Arc<TireRepository>,
    locale: String,
}

impl TireApi {
    pub fn new(tire_repo: Arc<TireRepository>, locale: impl Into<String>) -> Self {
        Self {
            tire_repo,
            locale: i18n::normalize_locale(&locale.into()).to_string(),
        }
    }

    /// All registry rows
    pub fn list_tires(&self) -> ApiResult<Vec<TireRecord>> {
        self.tire_repo.list_all().map_err(|e| self.query_failed(e))
    }

    /// Write the fields present in `update`; every other column keeps its value
    ///
    /// # Returns
    /// - Err(ApiError::NotFound): no tire with that code
    #[instrument(skip(self, update))]
    pub fn update_tire(&self, code: &str, update: TireUpdate) -> ApiResult<MessageResponse> {
        let code = self.check_code(code)?;

        self.tire_repo
            .find_by_code(code)
            .map_err(|e| self.query_failed(e))?
            .ok_or_else(|| self.not_found())?;

        let affected = self
            .tire_repo
            .update(code, &update)
            .map_err(|e| self.query_failed(e))?;
        if affected == 0 {
            return Err(self.not_found());
        }

        info!(code = %code, "tire updated");
        Ok(MessageResponse {
            mensaje: i18n::t("tire.updated", &self.locale),
        })
    }

    #[instrument(skip(self))]
    pub fn delete_tire(&self, code: &str) -> ApiResult<MessageResponse> {
        let code = self.check_code(code)?;

        let affected = self
            .tire_repo
            .delete_by_code(code)
            .map_err(|e| self.query_failed(e))?;
        if affected == 0 {
            return Err(self.not_found());
        }

        info!(code = %code, "tire deleted");
        Ok(MessageResponse {
            mensaje: i18n::t("tire.deleted", &self.locale),
        })
    }

    pub fn count_tires(&self) -> ApiResult<CountResponse> {
        self.count(self.tire_repo.count_all())
    }

    pub fn count_projects(&self) -> ApiResult<CountResponse> {
        self.count(self.tire_repo.count_distinct_projects())
    }

    pub fn count_assigned(&self) -> ApiResult<CountResponse> {
        self.count(self.tire_repo.count_by_movement(movement::ASSIGNED))
    }

    pub fn count_available(&self) -> ApiResult<CountResponse> {
        self.count(self.tire_repo.count_by_movement(movement::AVAILABLE))
    }

    // ==========================================
    // Helpers
    // ==========================================

    fn count(&self, result: Result<i64, RepositoryError>) -> ApiResult<CountResponse> {
        result
            .map(|cantidad| CountResponse { cantidad })
            .map_err(|e| self.query_failed(e))
    }

    fn check_code<'c>(&self, code: &'c str) -> ApiResult<&'c str> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ApiError::BadRequest(i18n::t("tire.invalid_code", &self.locale)));
        }
        Ok(code)
    }

    fn not_found(&self) -> ApiError {
        ApiError::NotFound(i18n::t("tire.not_found", &self.locale))
    }

    fn query_failed(&self, err: RepositoryError) -> ApiError {
        ApiError::transport(i18n::t("tire.query_failed", &self.locale), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn api() -> TireApi {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        conn.execute_batch(
            r#"
            INSERT INTO po_neumatico (codigo, marca, proyecto, tipo_movimiento)
            VALUES ('N-1', 'GOODYEAR', 'MINA NORTE', 'DISPONIBLE'),
                   ('N-2', 'MICHELIN', 'MINA NORTE', 'ASIGNADO'),
                   ('N-3', 'MICHELIN', 'PLANTA SUR', 'DISPONIBLE');
            "#,
        )
        .unwrap();
        let repo = TireRepository::from_connection(Arc::new(Mutex::new(conn)));
        TireApi::new(Arc::new(repo), "es")
    }

    #[test]
    fn test_counters() {
        let api = api();
        assert_eq!(api.count_tires().unwrap().cantidad, 3);
        assert_eq!(api.count_projects().unwrap().cantidad, 2);
        assert_eq!(api.count_assigned().unwrap().cantidad, 1);
        assert_eq!(api.count_available().unwrap().cantidad, 2);
    }

    #[test]
    fn test_partial_update_keeps_absent_fields() {
        let api = api();
        let update = TireUpdate {
            tipo_movimiento: Some(movement::ASSIGNED.to_string()),
            ..Default::default()
        };

        let response = api.update_tire("N-1", update).unwrap();
        assert_eq!(response.mensaje, "Neumático actualizado correctamente");

        let tires = api.list_tires().unwrap();
        let tire = tires.iter().find(|t| t.codigo == "N-1").unwrap();
        assert_eq!(tire.tipo_movimiento, "ASIGNADO");
        assert_eq!(tire.marca, "GOODYEAR");
        assert_eq!(tire.proyecto, "MINA NORTE");
    }

    #[test]
    fn test_missing_codes() {
        let api = api();
        assert!(matches!(
            api.update_tire("N-404", TireUpdate::default()),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(api.delete_tire("  "), Err(ApiError::BadRequest(_))));

        assert!(api.delete_tire("N-3").is_ok());
        assert!(matches!(api.delete_tire("N-3"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_update_does_not_blank_null_columns() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO po_neumatico (codigo, proyecto) VALUES ('N-1', 'A'), ('N-2', NULL);",
        )
        .unwrap();
        let conn = Arc::new(Mutex::new(conn));
        let api = TireApi::new(
            Arc::new(TireRepository::from_connection(conn.clone())),
            "es",
        );
        assert_eq!(api.count_projects().unwrap().cantidad, 1);

        let update: TireUpdate = serde_json::from_str(r#"{"KILOMETRAJE": 10}"#).unwrap();
        api.update_tire("N-2", update).unwrap();

        assert_eq!(api.count_projects().unwrap().cantidad, 1);
        let (marca, proyecto): (Option<String>, Option<String>) = conn
            .lock()
            .unwrap()
            .query_row(
                "SELECT marca, proyecto FROM po_neumatico WHERE codigo = 'N-2'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!((marca, proyecto), (None, None));
    }
}
