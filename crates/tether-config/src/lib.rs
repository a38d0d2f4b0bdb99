//! Client settings shared by the tether crates.
//!
//! Editors deliver settings as a JSON object, either in
//! `initializationOptions` or through `workspace/didChangeConfiguration`.
//! [`Config`] deserialises that object, filling every missing key with a
//! built-in default, so an empty object is always a valid configuration.

mod defaults;
mod features;
mod logging;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_TRUSTED_LANGUAGE, default_log_filter, default_log_filter_string,
    default_log_format, default_trusted_language,
};
pub use features::{ExperimentalFeature, ExperimentalFeatures};
pub use logging::{LogFormat, LogFormatParseError};

/// Errors raised while loading [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings payload was not a JSON object.
    #[error("client settings must be a JSON object, got {kind}")]
    NotAnObject {
        /// JSON kind that was supplied instead.
        kind: &'static str,
    },

    /// A setting held a value of the wrong shape.
    #[error("invalid client settings: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Hover rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverSettings {
    /// Fence language whose code blocks are rendered as trusted markup.
    #[serde(default = "defaults::default_trusted_language")]
    pub trusted_language: String,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            trusted_language: default_trusted_language(),
        }
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "defaults::default_log_filter_string")]
    log_filter: String,
    #[serde(default = "defaults::default_log_format")]
    log_format: LogFormat,
    #[serde(default)]
    experimental: ExperimentalFeatures,
    #[serde(default)]
    hover: HoverSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            experimental: ExperimentalFeatures::default(),
            hover: HoverSettings::default(),
        }
    }
}

impl Config {
    /// Builds a configuration from an editor settings object.
    ///
    /// `null` is treated as an empty object.
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigError> {
        match settings {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Ok(Self::deserialize(settings)?),
            other => Err(ConfigError::NotAnObject {
                kind: json_kind(other),
            }),
        }
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Value = serde_json::from_str(text)?;
        Self::from_settings(&settings)
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Experimental feature toggles.
    #[must_use]
    pub const fn experimental(&self) -> &ExperimentalFeatures {
        &self.experimental
    }

    /// Whether an experimental feature is enabled.
    #[must_use]
    pub const fn is_enabled(&self, feature: ExperimentalFeature) -> bool {
        self.experimental.is_enabled(feature)
    }

    /// Hover rendering settings.
    #[must_use]
    pub const fn hover(&self) -> &HoverSettings {
        &self.hover
    }

    /// Returns a copy with the feature switched on or off.
    #[must_use]
    pub fn with_feature(mut self, feature: ExperimentalFeature, enabled: bool) -> Self {
        self.experimental.set(feature, enabled);
        self
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
