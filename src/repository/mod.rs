// ==========================================
// Tire registry - repository layer
// ==========================================
// Data access only, no business rules
// All queries are parameterized
// ==========================================

pub mod error;
pub mod registry_import_repo;
pub mod registry_import_repo_impl;
pub mod tire_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use registry_import_repo::RegistryImportRepository;
pub use registry_import_repo_impl::RegistryImportRepositoryImpl;
pub use tire_repo::TireRepository;
