//! Display formatting for amounts and dates (pt-BR, BRL).
//!
//! Output mirrors what a pt-BR currency formatter produces:
//! `R$`, a no-break space, `.` thousands separators and a `,` decimal mark,
//! always with two decimals.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::TransactionType;

pub const CURRENCY_SYMBOL: &str = "R$";

const NBSP: char = '\u{a0}';

/// Above this a `Decimal` with two places no longer fits; fall back to f64.
const DECIMAL_LIMIT: f64 = 1e26;

/// Format an amount as BRL currency, e.g. `R$ 1.000,00`.
///
/// Rounds the shortest decimal form of `value` to cents, ties away from zero,
/// so `1.005` gives `R$ 1,01`. Any negative input keeps its sign, even when
/// it rounds to zero (`-R$ 0,00`).
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return format!("{CURRENCY_SYMBOL}{NBSP}NaN");
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{CURRENCY_SYMBOL}{NBSP}∞");
    }

    let cents = cents_of(value.abs());
    let units = cents / 100;
    let fraction = cents % 100;
    let sign = if value.is_sign_negative() { "-" } else { "" };

    format!(
        "{sign}{CURRENCY_SYMBOL}{NBSP}{},{fraction:02}",
        group_thousands(units)
    )
}

/// Row display for a transaction amount: outcomes get a leading `- `.
pub fn format_transaction_value(kind: TransactionType, value: f64) -> String {
    match kind {
        TransactionType::Income => format_value(value),
        TransactionType::Outcome => format!("- {}", format_value(value)),
    }
}

/// Format a date as `dd/mm/yyyy`.
pub fn format_date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Whole cents in a finite, non-negative amount.
fn cents_of(value: f64) -> u128 {
    // `Display` for f64 prints the shortest digits that parse back to `value`.
    if value < DECIMAL_LIMIT {
        if let Ok(exact) = Decimal::from_str(&value.to_string()) {
            let mut rounded =
                exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            return rounded.mantissa().unsigned_abs();
        }
    }
    // `as` saturates, so huge inputs cannot overflow here.
    (value * 100.0).round() as u128
}

fn group_thousands(units: u128) -> String {
    let digits = units.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push('.');
        }
        result.push(c);
    }
    result
}
