//! Transaction and balance records as served by the transactions API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "outcome")]
    Outcome,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }
}

/// Category reference embedded in each transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub title: String,
}

/// A single income or outcome record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique identifier assigned by the server
    pub id: String,
    pub title: String,
    /// Non-negative amount; the sign comes from `kind`
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        value: f64,
        kind: TransactionType,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            value,
            kind,
            category: Category {
                title: category.into(),
            },
            created_at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_outcome(&self) -> bool {
        self.kind == TransactionType::Outcome
    }
}

impl AsRef<Transaction> for Transaction {
    fn as_ref(&self) -> &Transaction {
        self
    }
}

/// Raw aggregates: income total, outcome total and net total
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Balance {
    pub income: f64,
    pub outcome: f64,
    pub total: f64,
}

impl Balance {
    /// Build a balance from income and outcome totals, deriving the net total
    pub fn from_totals(income: f64, outcome: f64) -> Self {
        Self {
            income,
            outcome,
            total: income - outcome,
        }
    }
}

/// Body of `GET /transactions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionsPayload {
    pub transactions: Vec<Transaction>,
    pub balance: Balance,
}
