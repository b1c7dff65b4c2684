//! Debt arithmetic over payment records.
//!
//! remaining = owed - paid - reductions, per record and per history, kept
//! separately for each currency. Returned products are reported through
//! [`returned_value`] but only debt reductions lower the balance.

mod balance;

pub use balance::{Balance, RecordStatus, Totals};

use rust_decimal::Decimal;

use crate::model::PaymentRecord;

pub fn record_totals(record: &PaymentRecord) -> Totals {
    let mut totals = Totals::new();
    totals.add_owed(&record.payment.amounts);
    for transaction in &record.transactions {
        totals.add_paid(&transaction.amounts);
    }
    for reduction in &record.debt_reductions {
        totals.add_reduced(&reduction.amounts);
    }
    totals
}

pub fn history_totals(records: &[PaymentRecord]) -> Totals {
    records.iter().fold(Totals::new(), |mut acc, record| {
        acc.merge(&record_totals(record));
        acc
    })
}

pub fn record_status(record: &PaymentRecord) -> RecordStatus {
    record_totals(record).status()
}

/// Value of everything sold under a payment (quantity x unit price)
pub fn sold_value(record: &PaymentRecord) -> Decimal {
    record.sold_products.iter().map(|p| p.line_total()).sum()
}

/// Value of returned goods. Display only, not netted into the balance.
pub fn returned_value(record: &PaymentRecord) -> Decimal {
    record.returned_products.iter().map(|p| p.line_total()).sum()
}
