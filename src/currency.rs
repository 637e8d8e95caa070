use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// how money is rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// digits after the decimal separator
    pub precision: u32,
}

impl CurrencyFormat {
    /// brazilian real, `R$ 1.234,56`
    pub fn brl() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            grouping_separator: '.',
            precision: 2,
        }
    }

    /// us dollar, `$ 1,234.56`
    pub fn usd() -> Self {
        Self {
            symbol: "$".to_string(),
            decimal_separator: '.',
            grouping_separator: ',',
            precision: 2,
        }
    }

    pub fn format(&self, amount: Money) -> String {
        format_currency(amount, self)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

/// format money with symbol, grouping and fixed precision; halves round away from zero
pub fn format_currency(amount: Money, format: &CurrencyFormat) -> String {
    let body = format_number(amount, format);
    let sign = if body_is_negative(amount, format.precision) { "-" } else { "" };

    if format.symbol.is_empty() {
        format!("{}{}", sign, body)
    } else {
        format!("{}{} {}", sign, format.symbol, body)
    }
}

/// format the absolute value without symbol or sign
pub fn format_number(amount: Money, format: &CurrencyFormat) -> String {
    let mut value = amount
        .as_decimal()
        .abs()
        .round_dp_with_strategy(format.precision, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(format.precision);

    let text = value.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let grouped = group_digits(int_part, format.grouping_separator);
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, format.decimal_separator, frac),
        None => grouped,
    }
}

/// parse a typed amount such as `R$ 1.234,56`, `1234,56` or `-10`
///
/// The symbol and grouping separators are optional, but grouping must split the integer part
/// into thousands; the decimal separator must be the configured one and may appear once.
pub fn parse_amount(input: &str, format: &CurrencyFormat) -> Result<Money> {
    let invalid = || LedgerError::InvalidAmount {
        message: format!("`{}` is not an amount", input.trim()),
    };

    let mut text = input.trim();
    let negative = text.starts_with('-');
    if negative {
        text = text[1..].trim_start();
    }
    if !format.symbol.is_empty() {
        text = text.strip_prefix(format.symbol.as_str()).unwrap_or(text).trim_start();
    }

    let (int_part, frac_part) = match text.split_once(format.decimal_separator) {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };
    let mut normalized = ungroup_digits(int_part, format.grouping_separator).ok_or_else(invalid)?;
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        normalized.push('.');
        normalized.push_str(frac);
    }

    let amount = Money::from_str_exact(&normalized).map_err(|_| invalid())?;
    Ok(if negative { -amount } else { amount })
}

// a value that rounds to zero is printed unsigned
fn body_is_negative(amount: Money, precision: u32) -> bool {
    let rounded = amount
        .as_decimal()
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    amount.is_negative() && !rounded.is_zero()
}

// inverse of `group_digits`: a plain digit run, or groups of three after a leading 1-3 digits
fn ungroup_digits(int_part: &str, separator: char) -> Option<String> {
    let groups: Vec<&str> = int_part.split(separator).collect();
    let well_formed = groups.iter().enumerate().all(|(index, group)| {
        let size_ok = match (groups.len(), index) {
            (1, _) => !group.is_empty(),
            (_, 0) => (1..=3).contains(&group.len()),
            _ => group.len() == 3,
        };
        size_ok && group.chars().all(|c| c.is_ascii_digit())
    });
    well_formed.then(|| groups.concat())
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
