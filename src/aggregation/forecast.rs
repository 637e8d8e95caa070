use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::CalculatedLoan;
use crate::calendar::Period;
use crate::decimal::Money;

/// what is still to be collected on active loans falling due in a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub period: Period,
    /// Σ initial interest
    pub interest: Money,
    /// Σ final total
    pub receivable: Money,
    pub loans: usize,
}

impl Forecast {
    pub fn compute(loans: &[CalculatedLoan], period: Period, today: NaiveDate) -> Self {
        let mut forecast = Forecast {
            period,
            interest: Money::ZERO,
            receivable: Money::ZERO,
            loans: 0,
        };
        for loan in due_in(loans, period, today) {
            forecast.interest += loan.initial_interest;
            forecast.receivable += loan.final_total;
            forecast.loans += 1;
        }
        forecast
    }

    /// one forecast per period, today through year
    pub fn all(loans: &[CalculatedLoan], today: NaiveDate) -> Vec<Forecast> {
        Period::ALL
            .iter()
            .map(|period| Forecast::compute(loans, *period, today))
            .collect()
    }
}

fn due_in<'a>(
    loans: &'a [CalculatedLoan],
    period: Period,
    today: NaiveDate,
) -> impl Iterator<Item = &'a CalculatedLoan> {
    loans
        .iter()
        .filter(|l| l.is_active())
        .filter(move |l| period.contains(today, l.loan.due_date))
}

/// interest expected from active loans due in the period
pub fn forecast_interest(loans: &[CalculatedLoan], period: Period, today: NaiveDate) -> Money {
    due_in(loans, period, today).map(|l| l.initial_interest).sum()
}

/// full amount receivable from active loans due in the period, penalties included
pub fn forecast_receivable(loans: &[CalculatedLoan], period: Period, today: NaiveDate) -> Money {
    due_in(loans, period, today).map(|l| l.final_total).sum()
}
