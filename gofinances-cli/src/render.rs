//! Plain-text rendering for the one-shot subcommands.

use gofinances_core::{DashboardSnapshot, FormattedBalance};

pub const CARD_TITLES: [&str; 3] = ["Entradas", "Saídas", "Total"];
pub const TABLE_HEADERS: [&str; 4] = ["Título", "Preço", "Categoria", "Data"];

/// Card values in display order; empty until a balance is known
pub fn card_values(balance: Option<&FormattedBalance>) -> [String; 3] {
    match balance {
        Some(b) => [
            b.formatted_income.clone(),
            b.formatted_outcome.clone(),
            b.formatted_total.clone(),
        ],
        None => Default::default(),
    }
}

pub fn render_balance(balance: Option<&FormattedBalance>) -> String {
    let values = card_values(balance);
    CARD_TITLES
        .iter()
        .zip(values.iter())
        .map(|(title, value)| format!("{title}: {value}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn table_rows(snapshot: &DashboardSnapshot) -> Vec<[String; 4]> {
    snapshot
        .transactions
        .iter()
        .map(|t| {
            [
                t.transaction.title.clone(),
                t.formatted_value.clone(),
                t.transaction.category.title.clone(),
                t.formatted_date.clone(),
            ]
        })
        .collect()
}

pub fn render_table(snapshot: &DashboardSnapshot) -> String {
    let rows = table_rows(snapshot);

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&TABLE_HEADERS.map(String::from)));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    if rows.is_empty() {
        out.push_str("(no transactions)\n");
    }
    out
}

pub fn render_snapshot(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&render_balance(snapshot.balance.as_ref()));
    out.push_str("\n\n");
    out.push_str(&render_table(snapshot));
    out
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gofinances_core::{Balance, Transaction, TransactionType, TransactionsPayload};

    fn snapshot() -> DashboardSnapshot {
        let at = Utc.with_ymd_and_hms(2020, 4, 17, 15, 0, 0).unwrap();
        DashboardSnapshot::loaded(
            TransactionsPayload {
                transactions: vec![
                    Transaction::new("1", "Salary", 500.0, TransactionType::Income, "Work", at),
                    Transaction::new("2", "Rent", 200.0, TransactionType::Outcome, "House", at),
                ],
                balance: Balance::from_totals(500.0, 200.0),
            },
            chrono_tz::UTC,
        )
    }

    #[test]
    fn test_render_balance_line() {
        let snap = snapshot();
        let s = render_balance(snap.balance.as_ref()).replace('\u{a0}', " ");
        assert_eq!(s, "Entradas: R$ 500,00 | Saídas: R$ 200,00 | Total: R$ 300,00");
    }

    #[test]
    fn test_render_balance_before_load_is_blank() {
        assert_eq!(render_balance(None), "Entradas:  | Saídas:  | Total: ");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let s = render_table(&snapshot()).replace('\u{a0}', " ");
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Título"));
        assert!(lines[2].contains("- R$ 200,00"));
        assert!(lines[2].ends_with("17/04/2020"));
        // title column is 6 wide plus a 2-space gap
        assert_eq!(lines[0].chars().nth(8), Some('P'));
        assert_eq!(lines[1].chars().nth(8), Some('R'));
        assert_eq!(lines[2].chars().nth(8), Some('-'));
    }

    #[test]
    fn test_render_empty_table() {
        let s = render_table(&DashboardSnapshot::unloaded());
        assert!(s.contains("(no transactions)"));
    }
}
