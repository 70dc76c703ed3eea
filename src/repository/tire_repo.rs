// ==========================================
// Tire registry - registry repository
// ==========================================
// CRUD and counters over po_neumatico
// No business rules here
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::tire::{TireRecord, TireUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const SELECT_COLUMNS: &str = r#"
    id, codigo, marca, medida, diseno, id_marca, id_medida, id_diseno,
    remanente, pr, carga, velocidad, fecha_fabricacion_cod, rq, oc, proyecto,
    costo, proveedor, fecha_registro, fecha_compra, estado, tipo_movimiento,
    kilometraje, usuario_super
"#;

// ==========================================
// TireRepository
// ==========================================
/// Registry table access
pub struct TireRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TireRepository {
    /// # Arguments
    /// - db_path: database file path
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// All registry rows, oldest first
    pub fn list_all(&self) -> RepositoryResult<Vec<TireRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM po_neumatico ORDER BY id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;

        let tires = stmt
            .query_map([], map_tire_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tires)
    }

    /// Find a tire by code
    ///
    /// # Returns
    /// - Ok(Some(TireRecord)): found
    /// - Ok(None): no such code
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<TireRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM po_neumatico WHERE codigo = ?1",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        match stmt.query_row(params![code], map_tire_row) {
            Ok(tire) => Ok(Some(tire)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Partial update: only the fields present in `update` are written
    ///
    /// # Returns
    /// - Ok(usize): matched rows (0 when the code does not exist)
    pub fn update(&self, code: &str, update: &TireUpdate) -> RepositoryResult<usize> {
        let assignments = update_assignments(update);
        let conn = self.get_conn()?;

        if assignments.is_empty() {
            let matched: i64 = conn.query_row(
                "SELECT COUNT(*) FROM po_neumatico WHERE codigo = ?1",
                params![code],
                |row| row.get(0),
            )?;
            return Ok(matched as usize);
        }

        let set_clause = assignments
            .iter()
            .enumerate()
            .map(|(idx, (column, _))| format!("{} = ?{}", column, idx + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE po_neumatico SET {} WHERE codigo = ?{}",
            set_clause,
            assignments.len() + 1
        );

        let values = assignments
            .into_iter()
            .map(|(_, value)| value)
            .chain(std::iter::once(Value::Text(code.to_string())));
        let affected = conn.execute(&sql, params_from_iter(values))?;
        Ok(affected)
    }

    /// # Returns
    /// - Ok(usize): deleted rows (0 when the code does not exist)
    pub fn delete_by_code(&self, code: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM po_neumatico WHERE codigo = ?1", params![code])?;
        Ok(affected)
    }

    pub fn count_all(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM po_neumatico", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Number of distinct non-null projects
    pub fn count_distinct_projects(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(DISTINCT proyecto) FROM po_neumatico",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Number of tires in the given movement status
    pub fn count_by_movement(&self, movement: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM po_neumatico WHERE tipo_movimiento = ?1",
            params![movement],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

// Column assignments for the fields present in an update, in column order
fn update_assignments(update: &TireUpdate) -> Vec<(&'static str, Value)> {
    let text = |v: &Option<String>| v.clone().map(Value::Text);
    let real = |v: &Option<f64>| v.map(Value::Real);

    [
        ("marca", text(&update.marca)),
        ("medida", text(&update.medida)),
        ("diseno", text(&update.diseno)),
        ("remanente", real(&update.remanente)),
        ("pr", text(&update.pr)),
        ("carga", text(&update.carga)),
        ("velocidad", text(&update.velocidad)),
        ("rq", text(&update.rq)),
        ("oc", text(&update.oc)),
        ("proyecto", text(&update.proyecto)),
        ("costo", real(&update.costo)),
        ("proveedor", text(&update.proveedor)),
        ("estado", text(&update.estado)),
        ("tipo_movimiento", text(&update.tipo_movimiento)),
        ("kilometraje", real(&update.kilometraje)),
        ("usuario_super", text(&update.usuario_super)),
    ]
    .into_iter()
    .filter_map(|(column, value)| value.map(|v| (column, v)))
    .collect()
}

// Nullable text columns are exposed as ""
fn map_tire_row(row: &Row<'_>) -> rusqlite::Result<TireRecord> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };
    let date = |idx: usize| -> rusqlite::Result<Option<NaiveDate>> {
        Ok(row
            .get::<_, Option<String>>(idx)?
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
    };

    Ok(TireRecord {
        id: row.get(0)?,
        codigo: row.get(1)?,
        marca: text(2)?,
        medida: text(3)?,
        diseno: text(4)?,
        id_marca: row.get(5)?,
        id_medida: row.get(6)?,
        id_diseno: row.get(7)?,
        remanente: row.get(8)?,
        pr: text(9)?,
        carga: text(10)?,
        velocidad: text(11)?,
        fecha_fabricacion_cod: text(12)?,
        rq: text(13)?,
        oc: text(14)?,
        proyecto: text(15)?,
        costo: row.get(16)?,
        proveedor: text(17)?,
        fecha_registro: date(18)?,
        fecha_compra: date(19)?,
        estado: text(20)?,
        tipo_movimiento: text(21)?,
        kilometraje: row.get(22)?,
        usuario_super: text(23)?,
    })
}
