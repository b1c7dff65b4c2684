use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::model::{CurrencyCode, MoneyAmount};

/// Owed, paid and reduced amounts in one currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub owed: Decimal,
    pub paid: Decimal,
    pub reduced: Decimal,
}

impl Balance {
    pub fn remaining(&self) -> Decimal {
        self.owed - self.paid - self.reduced
    }

    pub fn is_settled(&self) -> bool {
        self.remaining() <= Decimal::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordStatus {
    Paid,
    Outstanding,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
            Self::Outstanding => write!(f, "Outstanding"),
        }
    }
}

/// Balances grouped by currency code. Amounts in different currencies are
/// never added together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Totals {
    balances: BTreeMap<CurrencyCode, Balance>,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn get(&self, currency: &CurrencyCode) -> Option<&Balance> {
        self.balances.get(currency)
    }

    /// Balance for a currency, zero when nothing was recorded in it
    pub fn balance(&self, currency: &CurrencyCode) -> Balance {
        self.get(currency).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &Balance)> {
        self.balances.iter()
    }

    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.balances.keys()
    }

    pub fn status(&self) -> RecordStatus {
        if self.balances.values().all(Balance::is_settled) {
            RecordStatus::Paid
        } else {
            RecordStatus::Outstanding
        }
    }

    pub fn has_reductions(&self) -> bool {
        self.balances.values().any(|b| b.reduced > Decimal::ZERO)
    }

    pub(crate) fn add_owed(&mut self, amounts: &[MoneyAmount]) {
        for money in amounts {
            self.entry(&money.currency).owed += money.amount;
        }
    }

    pub(crate) fn add_paid(&mut self, amounts: &[MoneyAmount]) {
        for money in amounts {
            self.entry(&money.currency).paid += money.amount;
        }
    }

    pub(crate) fn add_reduced(&mut self, amounts: &[MoneyAmount]) {
        for money in amounts {
            self.entry(&money.currency).reduced += money.amount;
        }
    }

    pub fn merge(&mut self, other: &Totals) {
        for (currency, balance) in other.iter() {
            let entry = self.entry(currency);
            entry.owed += balance.owed;
            entry.paid += balance.paid;
            entry.reduced += balance.reduced;
        }
    }

    fn entry(&mut self, currency: &CurrencyCode) -> &mut Balance {
        self.balances.entry(currency.clone()).or_default()
    }
}
