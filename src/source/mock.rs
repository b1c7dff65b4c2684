use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::thread;
use std::time::Duration;
use tracing::debug;

use super::{HistoryPage, HistoryQuery, HistorySource};
use crate::error::Result;
use crate::ledger::history_totals;
use crate::model::{
    DebtReduction, DebtorInfo, MoneyAmount, Payment, PaymentRecord, ReductionKind,
    ReturnedProduct, SoldProduct, Transaction,
};

/// In-process stand-in for a history backend.
///
/// Every debtor gets the same fixed three-invoice history and pagination is
/// ignored, so every page shows the full set.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    latency: Duration,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before answering each request
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }
}

impl HistorySource for MockSource {
    fn fetch_history(&self, query: &HistoryQuery) -> Result<HistoryPage> {
        self.simulate_latency();

        let debtor = mock_debtors()
            .into_iter()
            .find(|d| d.id == query.debtor_id)
            .unwrap_or_else(|| DebtorInfo {
                id: query.debtor_id.clone(),
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                phone_number: "+1234567890".to_string(),
                email: "john.doe@example.com".to_string(),
            });

        let records = mock_records();
        debug!(debtor = %query.debtor_id, records = records.len(), "served mock history");

        Ok(HistoryPage {
            debtor,
            total_items: records.len(),
            totals: history_totals(&records),
            records,
        })
    }

    fn debtors(&self) -> Result<Vec<DebtorInfo>> {
        self.simulate_latency();
        Ok(mock_debtors())
    }
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn usd(amount: i64) -> Vec<MoneyAmount> {
    vec![MoneyAmount::new(Decimal::from(amount), "USD")]
}

fn debtor(id: &str, first: &str, last: &str, phone: &str) -> DebtorInfo {
    DebtorInfo {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone_number: phone.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
    }
}

fn mock_debtors() -> Vec<DebtorInfo> {
    vec![
        debtor("1", "John", "Doe", "+1234567890"),
        debtor("2", "Jane", "Smith", "+9876543210"),
        debtor("3", "Robert", "Johnson", "+1122334455"),
    ]
}

fn product(id: &str, name: &str, quantity: i64, unit: &str, unit_price: Decimal) -> SoldProduct {
    SoldProduct {
        id: id.to_string(),
        name: name.to_string(),
        quantity: Decimal::from(quantity),
        unit: unit.to_string(),
        unit_price,
    }
}

fn transaction(
    id: &str,
    number: &str,
    created_at: DateTime<Utc>,
    amount: i64,
    method: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        number: number.to_string(),
        created_at,
        amounts: usd(amount),
        payment_method: Some(method.to_string()),
    }
}

fn payment(id: &str, number: &str, created_at: DateTime<Utc>, amount: i64) -> Payment {
    Payment {
        id: id.to_string(),
        number: number.to_string(),
        created_at,
        amounts: usd(amount),
    }
}

fn mock_records() -> Vec<PaymentRecord> {
    let first = PaymentRecord {
        payment: payment("p1", "INV-2023-001", at(2023, 5, 15, 10, 30), 450),
        transactions: vec![
            transaction("t1", "TR-001", at(2023, 5, 20, 14, 0), 200, "Bank Transfer"),
            transaction("t2", "TR-002", at(2023, 6, 5, 9, 15), 150, "Cash"),
        ],
        sold_products: vec![
            product("p1", "Cement", 10, "bags", Decimal::new(125, 1)),
            product("p2", "Steel Bars", 5, "pcs", Decimal::from(25)),
            product("p3", "Paint", 3, "gallons", Decimal::from(35)),
        ],
        returned_products: vec![ReturnedProduct {
            id: "r1".to_string(),
            name: "Steel Bars".to_string(),
            quantity: Decimal::from(2),
            unit: "pcs".to_string(),
            unit_price: Decimal::from(25),
            returned_at: at(2023, 6, 10, 10, 0),
            reason: Some("Defective items".to_string()),
        }],
        debt_reductions: vec![
            DebtReduction {
                id: "dr1".to_string(),
                amounts: usd(50),
                reason: "Product return credit".to_string(),
                created_at: at(2023, 6, 10, 10, 0),
                kind: ReductionKind::ProductReturn,
            },
            DebtReduction {
                id: "dr2".to_string(),
                amounts: usd(20),
                reason: "Customer loyalty discount".to_string(),
                created_at: at(2023, 6, 15, 14, 30),
                kind: ReductionKind::Discount,
            },
        ],
    };

    let second = PaymentRecord {
        payment: payment("p2", "INV-2023-002", at(2023, 7, 10, 11, 45), 320),
        transactions: vec![transaction(
            "t3",
            "TR-003",
            at(2023, 7, 25, 16, 30),
            320,
            "Credit Card",
        )],
        sold_products: vec![
            product("p4", "Bricks", 200, "pcs", Decimal::new(5, 1)),
            product("p5", "Wood Panel", 15, "sheets", Decimal::from(18)),
        ],
        returned_products: Vec::new(),
        debt_reductions: Vec::new(),
    };

    let third = PaymentRecord {
        payment: payment("p3", "INV-2023-003", at(2023, 9, 5, 13, 20), 180),
        transactions: Vec::new(),
        sold_products: Vec::new(),
        returned_products: Vec::new(),
        debt_reductions: Vec::new(),
    };

    vec![first, second, third]
}
