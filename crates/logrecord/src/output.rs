//! Output mode selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Determines how a record is rendered: a JSON object or a flat line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Serialize the whole record as one JSON object
    #[default]
    Json,
    /// One human-readable line
    Flat,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Json => write!(f, "json"),
            OutputMode::Flat => write!(f, "flat"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = common::Error;

    fn from_str(s: &str) -> common::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputMode::Json),
            "flat" => Ok(OutputMode::Flat),
            other => Err(common::Error::config(format!("unknown output mode: {other}"))),
        }
    }
}
