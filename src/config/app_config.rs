// ==========================================
// Tire registry - application configuration
// ==========================================
// Source: environment variables (a `.env` file is honored)
// ==========================================

use crate::config::import_settings::ImportSettings;
use crate::i18n;
use std::path::PathBuf;

pub const ENV_LISTEN_ADDR: &str = "TIRE_REGISTRY_LISTEN_ADDR";
pub const ENV_DB_PATH: &str = "TIRE_REGISTRY_DB_PATH";
pub const ENV_LOCALE: &str = "TIRE_REGISTRY_LOCALE";
pub const ENV_MAX_UPLOAD_MB: &str = "TIRE_REGISTRY_MAX_UPLOAD_MB";
pub const ENV_LOG_FORMAT: &str = "TIRE_REGISTRY_LOG_FORMAT";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_MB: usize = 20;
const DB_FILE_NAME: &str = "tire_registry.db";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: String,
    pub db_path: String,
    /// Language of row messages and summaries ("es" / "en")
    pub locale: String,
    pub max_upload_bytes: usize,
    pub log_format: LogFormat,
    pub import: ImportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            db_path: default_db_path(),
            locale: i18n::DEFAULT_LOCALE.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            log_format: LogFormat::Text,
            import: ImportSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        // Missing .env is normal outside development
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let max_upload_bytes = match read(ENV_MAX_UPLOAD_MB).map(|v| v.parse::<usize>()) {
            Some(Ok(mb)) if mb > 0 => mb * 1024 * 1024,
            Some(_) => {
                tracing::warn!(
                    key = ENV_MAX_UPLOAD_MB,
                    "invalid upload limit, using default of {} MB",
                    DEFAULT_MAX_UPLOAD_MB
                );
                defaults.max_upload_bytes
            }
            None => defaults.max_upload_bytes,
        };

        Self {
            listen_addr: read(ENV_LISTEN_ADDR).unwrap_or(defaults.listen_addr),
            db_path: read(ENV_DB_PATH).unwrap_or(defaults.db_path),
            locale: read(ENV_LOCALE)
                .map(|l| i18n::normalize_locale(&l).to_string())
                .unwrap_or(defaults.locale),
            max_upload_bytes,
            log_format: read(ENV_LOG_FORMAT)
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.log_format),
            import: defaults.import,
        }
    }
}

/// Default database location: user data directory, or the working directory
pub fn default_db_path() -> String {
    let mut path = PathBuf::from(".").join(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("tire-registry");
        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.locale, "es");
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.db_path.ends_with(".db"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_LISTEN_ADDR, "127.0.0.1:8080"),
            (ENV_DB_PATH, "/tmp/registry.db"),
            (ENV_LOCALE, "EN"),
            (ENV_MAX_UPLOAD_MB, "5"),
            (ENV_LOG_FORMAT, "json"),
        ]);
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.db_path, "/tmp/registry.db");
        assert_eq!(config.locale, "en");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[(ENV_MAX_UPLOAD_MB, "lots"), (ENV_LOCALE, "fr")]);
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.locale, "es");
    }
}
