pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod model;
pub mod source;
pub mod store;
pub mod view;

pub use config::{Config, SourceKind};
pub use error::{HistoryError, Result};
pub use ledger::{history_totals, record_totals, Balance, RecordStatus, Totals};
pub use model::{
    CurrencyCode, DebtReduction, DebtorInfo, MoneyAmount, Payment, PaymentRecord, ReductionKind,
    ReturnedProduct, SoldProduct, Transaction,
};
pub use source::{FileSource, HistoryPage, HistoryQuery, HistorySource, MockSource};
pub use store::{DebtorStore, LoadState, LoadTicket, PageSize, Pagination};
pub use view::{ExpandTarget, ExpansionState, Section};
