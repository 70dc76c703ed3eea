// ==========================================
// Tire registry - configuration layer
// ==========================================
// AppConfig: process settings from the environment
// ImportSettings: header matchers + field caps
// ==========================================

pub mod app_config;
pub mod import_settings;

pub use app_config::{AppConfig, LogFormat};
pub use import_settings::{default_column_matchers, FieldLimits, ImportSettings};
