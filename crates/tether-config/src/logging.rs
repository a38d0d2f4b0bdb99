//! Log output formats understood by the telemetry layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output format for client log records.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per record, for editors that capture the stderr channel.
    #[default]
    Json,
    /// Single-line text, for reading the trace channel by eye.
    Compact,
}

/// Error returned when a [`LogFormat`] name is not recognised.
pub type LogFormatParseError = strum::ParseError;
