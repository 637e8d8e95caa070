use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CalculatedLoan;
use crate::calendar::{month_label, shift_month};
use crate::decimal::Money;

/// one calendar month of realized profit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub value: Money,
    /// bar height relative to the largest bucket
    pub height: u32,
}

/// profit of paid loans bucketed by payment month, for the trailing `months` months
///
/// Buckets are chronological and end with the month of `today`; empty months are kept at zero.
pub fn monthly_profit_series(
    loans: &[CalculatedLoan],
    today: NaiveDate,
    months: u32,
    max_height: u32,
) -> Vec<MonthlyBucket> {
    let span = months as i32;
    let mut buckets: Vec<MonthlyBucket> = (0..span)
        .map(|i| {
            let (year, month) = shift_month(today.year(), today.month(), i - span + 1);
            MonthlyBucket {
                year,
                month,
                label: month_label(month).to_string(),
                value: Money::ZERO,
                height: 0,
            }
        })
        .collect();

    for loan in loans.iter().filter(|l| l.is_paid()) {
        let Some(paid) = loan.paid_date else {
            continue;
        };
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| b.year == paid.year() && b.month == paid.month())
        {
            bucket.value += loan.profit;
        }
    }

    scale_heights(&mut buckets, max_height);
    buckets
}

fn scale_heights(buckets: &mut [MonthlyBucket], max_height: u32) {
    let max = buckets.iter().map(|b| b.value).max().unwrap_or(Money::ZERO);
    if !max.is_positive() {
        return;
    }

    for bucket in buckets.iter_mut() {
        if !bucket.value.is_positive() {
            continue;
        }
        let ratio = bucket.value.as_decimal() / max.as_decimal();
        bucket.height = (ratio * Decimal::from(max_height))
            .round()
            .to_u32()
            .unwrap_or(0);
    }
}
