// ==========================================
// Tire registry - import repository implementation
// ==========================================
// rusqlite over one shared connection
// No business rules here: lookups and a single insert
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::reference::{Brand, ReferenceSnapshot, Size, Supplier, TreadDesign};
use crate::domain::tire::{movement, NewTire};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::registry_import_repo::RegistryImportRepository;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// RegistryImportRepositoryImpl
// ==========================================
pub struct RegistryImportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl RegistryImportRepositoryImpl {
    /// Open a dedicated connection
    ///
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

    fn load_brands(conn: &Connection) -> RepositoryResult<Vec<Brand>> {
        let mut stmt = conn.prepare("SELECT id_marca, marca FROM neu_marca ORDER BY id_marca")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Brand {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn load_sizes(conn: &Connection) -> RepositoryResult<Vec<Size>> {
        let mut stmt =
            conn.prepare("SELECT id_medida, medida FROM neu_medida ORDER BY id_medida")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Size {
                    id: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn load_tread_designs(conn: &Connection) -> RepositoryResult<Vec<TreadDesign>> {
        let mut stmt =
            conn.prepare("SELECT id_diseno, diseno FROM neu_diseno ORDER BY id_diseno")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TreadDesign {
                    id: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn load_suppliers(conn: &Connection) -> RepositoryResult<Vec<Supplier>> {
        let mut stmt = conn.prepare("SELECT procve, pronom FROM proveedor ORDER BY procve")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Supplier {
                    code: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[async_trait]
impl RegistryImportRepository for RegistryImportRepositoryImpl {
    async fn load_reference_snapshot(&self) -> RepositoryResult<ReferenceSnapshot> {
        let conn = self.get_conn()?;

        Ok(ReferenceSnapshot::new(
            Self::load_brands(&conn)?,
            Self::load_sizes(&conn)?,
            Self::load_tread_designs(&conn)?,
            Self::load_suppliers(&conn)?,
        ))
    }

    async fn list_tire_codes(&self) -> RepositoryResult<HashSet<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT codigo FROM po_neumatico")?;

        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|r| r.map(|code| code.trim().to_string()))
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(codes)
    }

    async fn insert_tire(&self, tire: &NewTire) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO po_neumatico (
                codigo, marca, medida, diseno, id_marca, id_medida, id_diseno,
                remanente, pr, carga, velocidad, fecha_fabricacion_cod,
                rq, oc, proyecto, costo, proveedor,
                fecha_registro, fecha_compra, tipo_movimiento
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20
            )
            "#,
            params![
                tire.code,
                tire.brand,
                tire.size,
                tire.tread_design,
                tire.brand_id,
                tire.size_id,
                tire.tread_design_id,
                tire.remaining_tread,
                tire.ply_rating,
                tire.load_index,
                tire.speed_rating,
                tire.manufacture_date_code,
                tire.request_ref,
                tire.order_ref,
                tire.project,
                tire.cost,
                tire.supplier_name,
                tire.registration_date,
                tire.purchase_date,
                movement::AVAILABLE,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }
}
