mod debtor;
mod money;
mod payment;

pub use debtor::{is_valid_debtor_id, DebtorInfo};
pub use money::{CurrencyCode, MoneyAmount};
pub use payment::{
    DebtReduction, Payment, PaymentRecord, ReductionKind, ReturnedProduct, SoldProduct,
    Transaction,
};
