//! Display-ready dashboard state.
//!
//! A [`DashboardSnapshot`] bundles the formatted transaction list and the
//! formatted balance so both are always replaced together. Every method
//! returns a new snapshot; nothing is mutated in place.

use chrono_tz::Tz;
use serde::Serialize;

use crate::balance::{compute_balance, remove_transaction};
use crate::format::{format_date, format_transaction_value, format_value};
use crate::model::{Balance, Transaction, TransactionsPayload};
use crate::time::local_date;

/// A transaction together with its derived display strings
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FormattedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub formatted_value: String,
    pub formatted_date: String,
}

impl FormattedTransaction {
    pub fn new(transaction: Transaction, tz: Tz) -> Self {
        let formatted_value = format_transaction_value(transaction.kind, transaction.value);
        let formatted_date = format_date(local_date(transaction.created_at, tz));
        Self {
            transaction,
            formatted_value,
            formatted_date,
        }
    }
}

impl AsRef<Transaction> for FormattedTransaction {
    fn as_ref(&self) -> &Transaction {
        &self.transaction
    }
}

/// Balance aggregates paired with their display strings
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FormattedBalance {
    pub income: f64,
    pub outcome: f64,
    pub total: f64,
    pub formatted_income: String,
    pub formatted_outcome: String,
    pub formatted_total: String,
}

impl FormattedBalance {
    pub fn new(balance: Balance) -> Self {
        Self {
            income: balance.income,
            outcome: balance.outcome,
            total: balance.total,
            formatted_income: format_value(balance.income),
            formatted_outcome: format_value(balance.outcome),
            formatted_total: format_value(balance.total),
        }
    }

    pub fn raw(&self) -> Balance {
        Balance {
            income: self.income,
            outcome: self.outcome,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Unloaded,
    Loaded,
}

/// Immutable view of everything the dashboard renders
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub status: LoadStatus,
    pub transactions: Vec<FormattedTransaction>,
    /// `None` until the first successful load
    pub balance: Option<FormattedBalance>,
    /// Message of the most recent failed load, cleared by a successful one
    pub load_error: Option<String>,
}

impl DashboardSnapshot {
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Snapshot for a freshly loaded payload. The server balance is kept as-is.
    pub fn loaded(payload: TransactionsPayload, tz: Tz) -> Self {
        let transactions = payload
            .transactions
            .into_iter()
            .map(|t| FormattedTransaction::new(t, tz))
            .collect();
        Self {
            status: LoadStatus::Loaded,
            transactions,
            balance: Some(FormattedBalance::new(payload.balance)),
            load_error: None,
        }
    }

    /// Same data, with a load failure recorded
    pub fn with_load_error(&self, message: impl Into<String>) -> Self {
        Self {
            load_error: Some(message.into()),
            ..self.clone()
        }
    }

    /// Drop `id` from the list and recompute the balance from what remains.
    ///
    /// Returns the new snapshot and whether a record was removed. The balance
    /// is recomputed even when nothing matched.
    pub fn without_transaction(&self, id: &str) -> (Self, bool) {
        let (transactions, removed) = remove_transaction(&self.transactions, id);
        let balance = FormattedBalance::new(compute_balance(&transactions));
        let next = Self {
            status: self.status,
            transactions,
            balance: Some(balance),
            load_error: self.load_error.clone(),
        };
        (next, removed)
    }

    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    pub fn find(&self, id: &str) -> Option<&FormattedTransaction> {
        self.transactions.iter().find(|t| t.transaction.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use chrono::{TimeZone, Utc};

    fn scenario_payload() -> TransactionsPayload {
        let at = Utc.with_ymd_and_hms(2020, 4, 17, 15, 0, 0).unwrap();
        TransactionsPayload {
            transactions: vec![
                Transaction::new("1", "Salary", 500.0, TransactionType::Income, "Work", at),
                Transaction::new("2", "Rent", 200.0, TransactionType::Outcome, "House", at),
            ],
            balance: Balance {
                income: 500.0,
                outcome: 200.0,
                total: 300.0,
            },
        }
    }

    #[test]
    fn test_loaded_formats_rows_and_balance() {
        let snap = DashboardSnapshot::loaded(scenario_payload(), chrono_tz::America::Sao_Paulo);
        assert!(snap.is_loaded());

        let balance = snap.balance.as_ref().unwrap();
        assert_eq!(balance.formatted_income, format_value(500.0));
        assert_eq!(balance.formatted_outcome, format_value(200.0));
        assert_eq!(balance.formatted_total, format_value(300.0));

        let rent = snap.find("2").unwrap();
        assert!(rent.formatted_value.starts_with("- "));
        assert_eq!(rent.formatted_date, "17/04/2020");
        assert!(!snap.find("1").unwrap().formatted_value.starts_with('-'));
    }

    #[test]
    fn test_without_transaction_recomputes() {
        let snap = DashboardSnapshot::loaded(scenario_payload(), chrono_tz::UTC);
        let (next, removed) = snap.without_transaction("1");

        assert!(removed);
        assert_eq!(next.transactions.len(), 1);
        assert_eq!(next.transactions[0].transaction.id, "2");
        let b = next.balance.unwrap();
        assert_eq!(b.income, 0.0);
        assert_eq!(b.outcome, 200.0);
        assert_eq!(b.total, -200.0);
        assert_eq!(b.formatted_total, format_value(-200.0));

        // the source snapshot is untouched
        assert_eq!(snap.transactions.len(), 2);
        assert_eq!(snap.balance.unwrap().total, 300.0);
    }

    #[test]
    fn test_without_unknown_id_keeps_rows() {
        let snap = DashboardSnapshot::loaded(scenario_payload(), chrono_tz::UTC);
        let (next, removed) = snap.without_transaction("missing");
        assert!(!removed);
        assert_eq!(next.transactions, snap.transactions);
        assert_eq!(next.balance.unwrap().total, 300.0);
    }

    #[test]
    fn test_load_error_keeps_data() {
        let snap = DashboardSnapshot::unloaded().with_load_error("connection refused");
        assert!(!snap.is_loaded());
        assert!(snap.transactions.is_empty());
        assert!(snap.balance.is_none());
        assert_eq!(snap.load_error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_serializes_flat_rows() {
        let snap = DashboardSnapshot::loaded(scenario_payload(), chrono_tz::UTC);
        let v = serde_json::to_value(&snap).unwrap();
        assert_eq!(v["status"], "loaded");
        assert_eq!(v["transactions"][1]["type"], "outcome");
        assert_eq!(v["transactions"][1]["category"]["title"], "House");
        assert!(v["transactions"][0]["formatted_value"].is_string());
    }
}
