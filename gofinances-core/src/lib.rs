//! gofinances-core: transaction model, display formatting and balance reconciliation

pub mod balance;
pub mod dashboard;
pub mod format;
pub mod model;
pub mod time;

pub use balance::{compute_balance, is_consistent, remove_transaction};
pub use dashboard::{DashboardSnapshot, FormattedBalance, FormattedTransaction, LoadStatus};
pub use format::{format_date, format_transaction_value, format_value};
pub use model::{Balance, Category, Transaction, TransactionType, TransactionsPayload};
pub use time::{local_date, parse_timezone, DEFAULT_TIMEZONE};
