// ==========================================
// Tire registry - reference data
// ==========================================
// Read-only lookup tables owned by the data store:
// brand / size / tread design / supplier
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub id: i64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreadDesign {
    pub id: i64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub code: String,
    pub name: String,
}

// ==========================================
// ReferenceSnapshot
// ==========================================
// Loaded once per import; lookups are in-memory exact matches.
// Brands are keyed by uppercased trimmed name (case-insensitive),
// sizes/designs/suppliers by their stored value.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    brands: HashMap<String, i64>,
    sizes: HashMap<String, i64>,
    tread_designs: HashMap<String, i64>,
    suppliers: HashMap<String, String>,
}

impl ReferenceSnapshot {
    pub fn new(
        brands: Vec<Brand>,
        sizes: Vec<Size>,
        tread_designs: Vec<TreadDesign>,
        suppliers: Vec<Supplier>,
    ) -> Self {
        // First row wins when the table holds duplicates
        let mut snapshot = Self::default();
        for brand in brands {
            snapshot
                .brands
                .entry(brand.name.trim().to_uppercase())
                .or_insert(brand.id);
        }
        for size in sizes {
            snapshot.sizes.entry(size.value).or_insert(size.id);
        }
        for design in tread_designs {
            snapshot.tread_designs.entry(design.value).or_insert(design.id);
        }
        for supplier in suppliers {
            snapshot
                .suppliers
                .entry(supplier.code)
                .or_insert(supplier.name);
        }
        snapshot
    }

    /// Brand id by case-insensitive name
    pub fn brand_id(&self, name: &str) -> Option<i64> {
        self.brands.get(&name.trim().to_uppercase()).copied()
    }

    pub fn size_id(&self, value: &str) -> Option<i64> {
        self.sizes.get(value).copied()
    }

    pub fn tread_design_id(&self, value: &str) -> Option<i64> {
        self.tread_designs.get(value).copied()
    }

    /// Supplier display name by supplier code
    pub fn supplier_name(&self, code: &str) -> Option<&str> {
        self.suppliers.get(code).map(String::as_str)
    }
}
