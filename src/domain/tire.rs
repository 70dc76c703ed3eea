// ==========================================
// Tire registry - tire entities
// ==========================================
// NewTire: validated, normalized import row (insert payload)
// TireRecord: one registry row as exposed by the API
// TireUpdate: partial update body (absent fields stay untouched)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// NewTire - validated import record
// ==========================================
// Built per row after every lookup resolves, inserted, then dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTire {
    pub code: String,

    // ===== References (text as typed + resolved ids) =====
    pub brand: String,
    pub size: String,
    pub tread_design: String,
    pub brand_id: i64,
    pub size_id: i64,
    pub tread_design_id: i64,

    // ===== Technical attributes =====
    pub remaining_tread: Option<f64>,
    pub ply_rating: Option<String>,
    pub load_index: Option<String>,
    pub speed_rating: Option<String>,
    pub manufacture_date_code: Option<String>,

    // ===== Purchase data =====
    pub request_ref: Option<String>,
    pub order_ref: Option<String>,
    pub project: Option<String>,
    pub cost: Option<f64>,
    /// Supplier display name (resolved from the supplier code)
    pub supplier_name: String,

    // ===== Dates =====
    pub registration_date: NaiveDate,
    pub purchase_date: Option<NaiveDate>,
}

// ==========================================
// TireRecord - registry row
// ==========================================
// Keys follow the registry column names used by existing clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TireRecord {
    pub id: i64,
    pub codigo: String,
    pub marca: String,
    pub medida: String,
    #[serde(rename = "DISEÑO", alias = "DISENO")]
    pub diseno: String,
    pub id_marca: Option<i64>,
    pub id_medida: Option<i64>,
    pub id_diseno: Option<i64>,
    pub remanente: Option<f64>,
    pub pr: String,
    pub carga: String,
    pub velocidad: String,
    pub fecha_fabricacion_cod: String,
    pub rq: String,
    pub oc: String,
    pub proyecto: String,
    pub costo: Option<f64>,
    pub proveedor: String,
    pub fecha_registro: Option<NaiveDate>,
    pub fecha_compra: Option<NaiveDate>,
    pub estado: String,
    pub tipo_movimiento: String,
    pub kilometraje: Option<f64>,
    pub usuario_super: String,
}

// ==========================================
// TireUpdate - partial update body
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TireUpdate {
    pub marca: Option<String>,
    pub medida: Option<String>,
    #[serde(rename = "DISEÑO", alias = "DISENO")]
    pub diseno: Option<String>,
    pub remanente: Option<f64>,
    pub pr: Option<String>,
    pub carga: Option<String>,
    pub velocidad: Option<String>,
    pub rq: Option<String>,
    pub oc: Option<String>,
    pub proyecto: Option<String>,
    pub costo: Option<f64>,
    pub proveedor: Option<String>,
    pub estado: Option<String>,
    pub tipo_movimiento: Option<String>,
    pub kilometraje: Option<f64>,
    pub usuario_super: Option<String>,
}

/// Movement status values stored in `tipo_movimiento`
pub mod movement {
    pub const ASSIGNED: &str = "ASIGNADO";
    pub const AVAILABLE: &str = "DISPONIBLE";
}
