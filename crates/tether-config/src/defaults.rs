//! Built-in configuration values.

use crate::logging::LogFormat;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Language whose fenced code blocks are trusted in hover content.
pub const DEFAULT_TRUSTED_LANGUAGE: &str = "rust";

/// Default log filter expression.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value for serde defaults.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default log output format.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned trusted-language value for serde defaults.
#[must_use]
pub fn default_trusted_language() -> String {
    DEFAULT_TRUSTED_LANGUAGE.to_owned()
}

pub(crate) const fn enabled() -> bool {
    true
}
