use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::MoneyAmount;

/// An invoice or sale the debtor owes money on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub number: String,
    pub created_at: DateTime<Utc>,
    pub amounts: Vec<MoneyAmount>,
}

/// Money received against a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub number: String,
    pub created_at: DateTime<Utc>,
    pub amounts: Vec<MoneyAmount>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldProduct {
    pub id: String,
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_price: Decimal,
}

impl SoldProduct {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnedProduct {
    pub id: String,
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_price: Decimal,
    pub returned_at: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ReturnedProduct {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionKind {
    ProductReturn,
    Discount,
    Adjustment,
}

impl fmt::Display for ReductionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductReturn => write!(f, "Product Return"),
            Self::Discount => write!(f, "Discount"),
            Self::Adjustment => write!(f, "Adjustment"),
        }
    }
}

/// A non-payment decrease of what is owed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtReduction {
    pub id: String,
    pub amounts: Vec<MoneyAmount>,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub kind: ReductionKind,
}

/// One payment with everything recorded against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment: Payment,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub sold_products: Vec<SoldProduct>,
    #[serde(default)]
    pub returned_products: Vec<ReturnedProduct>,
    #[serde(default)]
    pub debt_reductions: Vec<DebtReduction>,
}

impl PaymentRecord {
    pub fn id(&self) -> &str {
        &self.payment.id
    }
}
