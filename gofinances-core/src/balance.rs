//! Balance reconciliation over an in-memory transaction list.
//!
//! The balance never has its own identity: it is always a reduction over
//! the current list, recomputed from scratch after every change.

use crate::model::{Balance, Transaction, TransactionType};

/// Half a cent; server aggregates within this distance count as consistent.
pub const BALANCE_TOLERANCE: f64 = 0.005;

/// Sum of `value` over the transactions of one kind
pub fn total_of<'a, T>(transactions: impl IntoIterator<Item = &'a T>, kind: TransactionType) -> f64
where
    T: AsRef<Transaction> + 'a,
{
    transactions
        .into_iter()
        .map(AsRef::as_ref)
        .filter(|t| t.kind == kind)
        .fold(0.0, |acc, t| acc + t.value)
}

/// Recompute income, outcome and net totals from a list
pub fn compute_balance<T: AsRef<Transaction>>(transactions: &[T]) -> Balance {
    let income = total_of(transactions, TransactionType::Income);
    let outcome = total_of(transactions, TransactionType::Outcome);
    Balance::from_totals(income, outcome)
}

/// Return a new list without the record `id`, plus whether anything was removed.
///
/// The input is never mutated; an unknown id yields an equal copy.
pub fn remove_transaction<T>(transactions: &[T], id: &str) -> (Vec<T>, bool)
where
    T: AsRef<Transaction> + Clone,
{
    let kept: Vec<T> = transactions
        .iter()
        .filter(|t| t.as_ref().id != id)
        .cloned()
        .collect();
    let removed = kept.len() != transactions.len();
    (kept, removed)
}

/// True when `balance` matches what the list adds up to
pub fn is_consistent<T: AsRef<Transaction>>(balance: &Balance, transactions: &[T]) -> bool {
    let expected = compute_balance(transactions);
    (balance.income - expected.income).abs() <= BALANCE_TOLERANCE
        && (balance.outcome - expected.outcome).abs() <= BALANCE_TOLERANCE
        && (balance.total - expected.total).abs() <= BALANCE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tx(id: &str, kind: TransactionType, value: f64) -> Transaction {
        let at = Utc.with_ymd_and_hms(2020, 4, 17, 12, 0, 0).unwrap();
        Transaction::new(id, format!("t{id}"), value, kind, "Others", at)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("1", TransactionType::Income, 500.0),
            tx("2", TransactionType::Outcome, 200.0),
            tx("3", TransactionType::Income, 49.9),
            tx("4", TransactionType::Outcome, 0.0),
        ]
    }

    #[test]
    fn test_compute_balance() {
        let b = compute_balance(&sample());
        assert!((b.income - 549.9).abs() < 1e-9);
        assert_eq!(b.outcome, 200.0);
        assert!((b.total - 349.9).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list_balances_to_zero() {
        let empty: Vec<Transaction> = Vec::new();
        assert_eq!(compute_balance(&empty), Balance::default());
    }

    #[test]
    fn test_total_is_income_minus_outcome_after_every_removal() {
        let mut list = sample();
        for id in ["2", "1", "4", "3"] {
            let (next, removed) = remove_transaction(&list, id);
            assert!(removed);
            assert_eq!(next.len(), list.len() - 1);
            let b = compute_balance(&next);
            let income = total_of(&next, TransactionType::Income);
            let outcome = total_of(&next, TransactionType::Outcome);
            assert_eq!(b.total, income - outcome);
            list = next;
        }
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_absent_id_keeps_list() {
        let list = sample();
        let (next, removed) = remove_transaction(&list, "nope");
        assert!(!removed);
        assert_eq!(next, list);
    }

    #[test]
    fn test_is_consistent() {
        let list = sample();
        let good = compute_balance(&list);
        assert!(is_consistent(&good, &list));

        let bad = Balance::from_totals(good.income + 1.0, good.outcome);
        assert!(!is_consistent(&bad, &list));
    }
}
