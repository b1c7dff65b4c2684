use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Config directory not found at {0}. Run 'debtor init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Debtor '{0}' not found")]
    DebtorNotFound(String),

    #[error("Failed to parse debtor data {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Debtor data {path} belongs to '{found}', expected '{expected}'")]
    DebtorIdMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Invalid debtor id '{0}'. Use letters, digits, '-' or '_'.")]
    InvalidDebtorId(String),

    #[error("Failed to fetch debtor history: {0}")]
    LoadFailed(String),

    #[error("Invalid page size {0}. Use 10, 20 or 50.")]
    InvalidPageSize(u32),

    #[error("Invalid page {0}. Pages start at 1 and must fit the page size.")]
    InvalidPage(usize),

    #[error("Unknown section '{0}'. Use details, products, returns or reductions.")]
    UnknownSection(String),

    #[error("Invalid expand target '{0}'. Expected 'payment-id' or 'payment-id:section'.")]
    InvalidExpandTarget(String),

    #[error("Nothing to export: no debts loaded for {0}")]
    NothingToExport(String),

    #[error("Failed to generate export: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;
