use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{HistoryError, Result};
use crate::ledger::{record_totals, returned_value, RecordStatus, Totals};
use crate::model::{is_valid_debtor_id, CurrencyCode, DebtorInfo, PaymentRecord};

/// Amounts for one currency as written to the statement
#[derive(Debug, Serialize)]
pub struct CurrencySummary {
    pub currency: CurrencyCode,
    pub owed: Decimal,
    pub paid: Decimal,
    pub reduced: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StatementRecord<'a> {
    #[serde(flatten)]
    pub record: &'a PaymentRecord,
    pub status: RecordStatus,
    pub totals: Vec<CurrencySummary>,
    pub returned_value: Decimal,
}

/// Complete data for a debtor statement document
#[derive(Debug, Serialize)]
pub struct Statement<'a> {
    pub debtor: &'a DebtorInfo,
    pub generated_at: DateTime<Utc>,
    pub records: Vec<StatementRecord<'a>>,
    pub totals: Vec<CurrencySummary>,
}

fn summarize(totals: &Totals) -> Vec<CurrencySummary> {
    totals
        .iter()
        .map(|(currency, balance)| CurrencySummary {
            currency: currency.clone(),
            owed: balance.owed,
            paid: balance.paid,
            reduced: balance.reduced,
            remaining: balance.remaining(),
        })
        .collect()
}

pub fn build_statement<'a>(
    debtor: &'a DebtorInfo,
    records: &'a [PaymentRecord],
    totals: &Totals,
) -> Statement<'a> {
    let records = records
        .iter()
        .map(|record| {
            let record_totals = record_totals(record);
            StatementRecord {
                record,
                status: record_totals.status(),
                totals: summarize(&record_totals),
                returned_value: returned_value(record),
            }
        })
        .collect();

    Statement {
        debtor,
        generated_at: Utc::now(),
        records,
        totals: summarize(totals),
    }
}

/// File name used for a debtor's statement
pub fn statement_file_name(debtor_id: &str) -> Result<String> {
    if !is_valid_debtor_id(debtor_id) {
        return Err(HistoryError::InvalidDebtorId(debtor_id.to_string()));
    }
    Ok(format!("statement-{debtor_id}.json"))
}

/// Write a statement as JSON into `dir`, returning the file path
pub fn write_statement(
    dir: &Path,
    debtor: &DebtorInfo,
    records: &[PaymentRecord],
    totals: &Totals,
) -> Result<PathBuf> {
    let file_name = statement_file_name(&debtor.id)?;
    let statement = build_statement(debtor, records, totals);
    let json = serde_json::to_string_pretty(&statement)
        .map_err(|e| HistoryError::Export(e.to_string()))?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, json)?;

    info!(debtor = %debtor.id, path = %path.display(), "statement exported");
    Ok(path)
}
