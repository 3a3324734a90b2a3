//! Plan file formats.

use std::{fmt, path::Path, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, WaymarkError},
    models::PlanSnapshot,
};

/// Serialization format of an exported plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl ExportFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        extension.parse().ok()
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }

    /// Writes a snapshot in this format.
    pub fn encode(&self, snapshot: &PlanSnapshot) -> Result<String> {
        match self {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
            ExportFormat::Yaml => Ok(serde_yaml::to_string(snapshot)?),
        }
    }

    /// Reads a snapshot in this format.
    ///
    /// Anything that is not a structurally valid plan file is a validation
    /// error; whether the plan fits a trip is checked later.
    pub fn decode(&self, text: &str) -> Result<PlanSnapshot> {
        let decoded = match self {
            ExportFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            ExportFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };
        decoded.map_err(|e| WaymarkError::validation(format!("not a {self} plan file: {e}")))
    }
}

impl FromStr for ExportFormat {
    type Err = WaymarkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(WaymarkError::invalid_input("format")
                .with_reason(format!("unknown format '{other}', expected json or yaml"))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Yaml => write!(f, "YAML"),
        }
    }
}
