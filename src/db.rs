// ==========================================
// Tire registry - SQLite connection setup
// ==========================================
// - Every connection gets the same PRAGMAs (foreign keys, busy_timeout)
// - Schema bootstrap for the registry and its reference tables
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version this build expects
///
/// Only used for a startup warning, no automatic migration.
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Registry schema
///
/// Reference tables are read-only for the importer; they are created here so
/// a fresh database is usable, and populated by whoever owns the master data.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS neu_marca (
    id_marca INTEGER PRIMARY KEY AUTOINCREMENT,
    marca    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS neu_medida (
    id_medida INTEGER PRIMARY KEY AUTOINCREMENT,
    medida    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS neu_diseno (
    id_diseno INTEGER PRIMARY KEY AUTOINCREMENT,
    diseno    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS proveedor (
    procve TEXT PRIMARY KEY,
    pronom TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS po_neumatico (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    codigo                TEXT NOT NULL UNIQUE,
    marca                 TEXT,
    medida                TEXT,
    diseno                TEXT,
    id_marca              INTEGER REFERENCES neu_marca(id_marca),
    id_medida             INTEGER REFERENCES neu_medida(id_medida),
    id_diseno             INTEGER REFERENCES neu_diseno(id_diseno),
    remanente             REAL,
    pr                    TEXT,
    carga                 TEXT,
    velocidad             TEXT,
    fecha_fabricacion_cod TEXT,
    rq                    TEXT,
    oc                    TEXT,
    proyecto              TEXT,
    costo                 REAL,
    proveedor             TEXT,
    fecha_registro        TEXT,
    fecha_compra          TEXT,
    estado                TEXT,
    tipo_movimiento       TEXT,
    kilometraje           REAL,
    usuario_super         TEXT
);

CREATE INDEX IF NOT EXISTS idx_po_neumatico_tipo_movimiento
    ON po_neumatico(tipo_movimiento);

CREATE TABLE IF NOT EXISTS schema_version (
    version    INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Apply the shared PRAGMAs to a connection
///
/// foreign_keys and busy_timeout are per-connection settings.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the shared configuration
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create missing tables and record the schema version (idempotent)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    if read_schema_version(conn)?.is_none() {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_SCHEMA_VERSION],
        )?;
    }
    Ok(())
}

/// Read schema_version (None when the table is missing or empty)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
