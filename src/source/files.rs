use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{HistoryPage, HistoryQuery, HistorySource};
use crate::error::{HistoryError, Result};
use crate::ledger::history_totals;
use crate::model::{is_valid_debtor_id, DebtorInfo, PaymentRecord};

/// Contents of one `<debtor-id>.toml` data file
#[derive(Debug, Deserialize, Serialize)]
pub struct DebtorFile {
    pub debtor: DebtorInfo,
    #[serde(default)]
    pub records: Vec<PaymentRecord>,
}

/// Reads debtor histories from a directory of TOML files
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
}

impl FileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn debtor_path(&self, debtor_id: &str) -> Result<PathBuf> {
        if !is_valid_debtor_id(debtor_id) {
            return Err(HistoryError::DebtorNotFound(debtor_id.to_string()));
        }
        Ok(self.data_dir.join(format!("{debtor_id}.toml")))
    }

    /// Parse a data file. The `[debtor].id` must match the file stem, since
    /// lookups go by file name.
    fn load_file(path: &Path) -> Result<DebtorFile> {
        let content = fs::read_to_string(path)?;
        let file: DebtorFile = toml::from_str(&content).map_err(|e| HistoryError::DataParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if file.debtor.id != stem {
            return Err(HistoryError::DebtorIdMismatch {
                path: path.to_path_buf(),
                expected: stem.to_string(),
                found: file.debtor.id,
            });
        }
        Ok(file)
    }
}

impl HistorySource for FileSource {
    fn fetch_history(&self, query: &HistoryQuery) -> Result<HistoryPage> {
        let path = self.debtor_path(&query.debtor_id)?;
        if !path.exists() {
            return Err(HistoryError::DebtorNotFound(query.debtor_id.clone()));
        }

        let file = Self::load_file(&path)?;
        let total_items = file.records.len();
        let totals = history_totals(&file.records);
        let records: Vec<PaymentRecord> = file
            .records
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();

        debug!(
            debtor = %query.debtor_id,
            path = %path.display(),
            returned = records.len(),
            total_items,
            "read debtor history file"
        );

        Ok(HistoryPage {
            debtor: file.debtor,
            records,
            total_items,
            totals,
        })
    }

    fn debtors(&self) -> Result<Vec<DebtorInfo>> {
        if !self.data_dir.exists() {
            warn!(path = %self.data_dir.display(), "data directory does not exist");
            return Ok(Vec::new());
        }

        let mut debtors = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            debtors.push(Self::load_file(&path)?.debtor);
        }
        debtors.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(debtors)
    }
}
