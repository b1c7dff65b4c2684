//! Where debtor histories come from.

mod files;
mod mock;

pub use files::{DebtorFile, FileSource};
pub use mock::MockSource;

use serde::Serialize;

use crate::error::Result;
use crate::ledger::Totals;
use crate::model::{DebtorInfo, PaymentRecord};

/// One page request for a debtor's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub debtor_id: String,
    pub limit: usize,
    pub offset: usize,
}

/// A page of payment records.
///
/// `total_items` and `totals` cover the debtor's whole history, not just the
/// records on this page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPage {
    pub debtor: DebtorInfo,
    pub records: Vec<PaymentRecord>,
    pub total_items: usize,
    pub totals: Totals,
}

pub trait HistorySource {
    fn fetch_history(&self, query: &HistoryQuery) -> Result<HistoryPage>;

    fn debtors(&self) -> Result<Vec<DebtorInfo>>;
}

impl<S: HistorySource + ?Sized> HistorySource for Box<S> {
    fn fetch_history(&self, query: &HistoryQuery) -> Result<HistoryPage> {
        (**self).fetch_history(query)
    }

    fn debtors(&self) -> Result<Vec<DebtorInfo>> {
        (**self).debtors()
    }
}
