//! gofinances-client: transactions API client and the dashboard controller

pub mod api;
pub mod controller;
pub mod error;

pub use api::{HttpTransactionsApi, TransactionsApi};
pub use controller::{DeleteOutcome, TransactionListController};
pub use error::{ApiError, ControllerError};
