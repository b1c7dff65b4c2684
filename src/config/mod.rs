mod settings;

pub use settings::{
    Config, DisplaySettings, ExportSettings, SourceKind, SourceSettings, StoreSettings,
};

use crate::error::{HistoryError, Result};
use crate::source::{FileSource, HistorySource, MockSource};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Get the config directory path (~/.debtor-history/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "debtor-history") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.debtor-history/
    let home = dirs_home().ok_or_else(|| {
        HistoryError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".debtor-history"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve a configured path; relative paths live under the config directory
pub fn resolve_path(path: &str, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(path);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    if !config_dir.exists() {
        return Err(HistoryError::ConfigNotFound(config_dir.to_path_buf()));
    }
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(HistoryError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content).map_err(|e| HistoryError::ConfigParse {
        path: path.clone(),
        source: e,
    })?;
    debug!(path = %path.display(), source = ?config.source.kind, "loaded config");
    Ok(config)
}

/// Build the history source selected in the config
pub fn open_source(config: &Config, config_dir: &Path) -> Box<dyn HistorySource> {
    match config.source.kind {
        SourceKind::Mock => Box::new(MockSource::with_latency(Duration::from_millis(
            config.source.latency_ms,
        ))),
        SourceKind::Files => Box::new(FileSource::new(resolve_path(
            &config.source.data_dir,
            config_dir,
        ))),
    }
}

/// Create the config directory with template files
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    if config_dir.exists() {
        return Err(HistoryError::AlreadyInitialized(config_dir.to_path_buf()));
    }

    fs::create_dir_all(config_dir.join("data"))?;
    fs::create_dir_all(config_dir.join("exports"))?;

    fs::write(config_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(config_dir.join("data").join("1.toml"), DEBTOR_TEMPLATE)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[store]
page_size = 10          # 10, 20 or 50

[source]
kind = "mock"           # "mock" (built-in sample data) or "files"
data_dir = "data"       # one <debtor-id>.toml per debtor, relative to this directory
latency_ms = 0          # artificial delay for the mock source

[export]
output_dir = "exports"

[display]
date_format = "%b %d, %Y"
"#;

/// Template content for data/1.toml
pub const DEBTOR_TEMPLATE: &str = r#"# One file per debtor. The file name (without .toml) is the debtor id
# used by the history and export commands when source.kind = "files".

[debtor]
id = "1"
first_name = "John"
last_name = "Doe"
phone_number = "+1234567890"
email = "john.doe@example.com"

[[records]]
[records.payment]
id = "p1"
number = "INV-2023-001"
created_at = "2023-05-15T10:30:00Z"
amounts = [{ amount = 450, currency = "USD" }]

[[records.transactions]]
id = "t1"
number = "TR-001"
created_at = "2023-05-20T14:00:00Z"
amounts = [{ amount = 200, currency = "USD" }]
payment_method = "Bank Transfer"

[[records.transactions]]
id = "t2"
number = "TR-002"
created_at = "2023-06-05T09:15:00Z"
amounts = [{ amount = 150, currency = "USD" }]
payment_method = "Cash"

[[records.sold_products]]
id = "p1"
name = "Cement"
quantity = 10
unit = "bags"
unit_price = 12.5

[[records.sold_products]]
id = "p2"
name = "Steel Bars"
quantity = 5
unit = "pcs"
unit_price = 25

[[records.returned_products]]
id = "r1"
name = "Steel Bars"
quantity = 2
unit = "pcs"
unit_price = 25
returned_at = "2023-06-10T10:00:00Z"
reason = "Defective items"

[[records.debt_reductions]]
id = "dr1"
amounts = [{ amount = 50, currency = "USD" }]
reason = "Product return credit"
created_at = "2023-06-10T10:00:00Z"
kind = "product_return"

[[records.debt_reductions]]
id = "dr2"
amounts = [{ amount = 20, currency = "USD" }]
reason = "Customer loyalty discount"
created_at = "2023-06-15T14:30:00Z"
kind = "discount"

[[records]]
[records.payment]
id = "p2"
number = "INV-2023-002"
created_at = "2023-07-10T11:45:00Z"
amounts = [{ amount = 320, currency = "USD" }]

[[records.transactions]]
id = "t3"
number = "TR-003"
created_at = "2023-07-25T16:30:00Z"
amounts = [{ amount = 320, currency = "USD" }]
payment_method = "Credit Card"
"#;
