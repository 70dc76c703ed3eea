// ==========================================
// Tire registry - core library
// ==========================================
// Bulk registry upload for a fleet tire inventory:
// spreadsheet in, validated rows inserted, per-row report out
// Stack: axum + rusqlite + calamine
// ==========================================

// Message catalogs
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Import layer - decoding, column resolution, validation
pub mod importer;

// Configuration
pub mod config;

// Database infrastructure (PRAGMAs, schema bootstrap)
pub mod db;

// Logging
pub mod logging;

// Localization
pub mod i18n;

// API layer - business operations
pub mod api;

// Application layer - HTTP wiring
pub mod app;

// ==========================================
// Core re-exports
// ==========================================

pub use api::{ImportApi, TireApi};
pub use domain::{ImportSummary, NewTire, RowError, RowOutcome, TireRecord};
pub use importer::{ImportError, RegistryImporter, RegistryImporterImpl};

// ==========================================
// Constants
// ==========================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
