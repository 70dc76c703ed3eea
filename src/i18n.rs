// ==========================================
// Localization (i18n)
// ==========================================
// rust-i18n catalogs under locales/: es (default), en
// Note: rust_i18n::i18n! is invoked in lib.rs
// ==========================================
// Every lookup takes an explicit locale so request handling never
// touches the global rust-i18n locale.
// ==========================================

/// Default message language
pub const DEFAULT_LOCALE: &str = "es";

/// Supported message languages
pub const SUPPORTED_LOCALES: [&str; 2] = ["es", "en"];

/// Map a requested locale onto a supported one ("en-US" → "en", unknown → "es")
pub fn normalize_locale(requested: &str) -> &'static str {
    let lang = requested
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| *l == lang)
        .unwrap_or(DEFAULT_LOCALE)
}

/// Translate a message (no arguments)
///
/// # Example
/// ```no_run
/// use tire_registry::i18n::t;
/// let msg = t("import.no_file", "es");
/// ```
pub fn t(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// Translate a message with `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use tire_registry::i18n::t_with_args;
/// let msg = t_with_args("import.row.brand_invalid", "es", &[("value", "GOODYAER")]);
/// ```
pub fn t_with_args(key: &str, locale: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(key, locale);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
