// ==========================================
// Tire registry - import repository trait
// ==========================================
// Data access needed by the registry importer
// No business rules here: lookups and a single insert
// ==========================================

use crate::domain::reference::ReferenceSnapshot;
use crate::domain::tire::NewTire;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use std::collections::HashSet;

// ==========================================
// RegistryImportRepository Trait
// ==========================================
// Implementor: RegistryImportRepositoryImpl (rusqlite)
#[async_trait]
pub trait RegistryImportRepository: Send + Sync {
    /// Load brand / size / tread design / supplier tables
    ///
    /// # Returns
    /// - Ok(ReferenceSnapshot): in-memory lookup tables for one import
    /// - Err: database error (aborts the import before any row)
    async fn load_reference_snapshot(&self) -> RepositoryResult<ReferenceSnapshot>;

    /// Codes already present in the registry (trimmed)
    async fn list_tire_codes(&self) -> RepositoryResult<HashSet<String>>;

    /// Insert one validated tire
    ///
    /// # Returns
    /// - Ok(i64): id of the new registry row
    /// - Err: constraint violation or any other database failure
    async fn insert_tire(&self, tire: &NewTire) -> RepositoryResult<i64>;
}
