use serde::{Deserialize, Serialize};

use crate::store::PageSize;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub page_size: PageSize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Mock,
    Files,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Artificial delay for the mock source, in milliseconds
    #[serde(default)]
    pub latency_ms: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            data_dir: default_data_dir(),
            latency_ms: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    /// chrono format string for dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_output_dir() -> String {
    "exports".to_string()
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}
