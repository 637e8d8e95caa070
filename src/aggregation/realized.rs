use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculation::CalculatedLoan;
use crate::calendar::month_start;
use crate::decimal::Money;
use crate::records::Expense;

/// trailing window used by the "last 30 days" figure, today included
pub const TRAILING_WINDOW_DAYS: i64 = 30;

/// profit already collected, net of expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedFigures {
    pub gross_profit: Money,
    pub total_expenses: Money,
    pub net_profit: Money,
    pub month_to_date_profit: Money,
    pub last_30_days_profit: Money,
    pub month_to_date_expenses: Money,
    pub month_to_date_net_profit: Money,
}

impl RealizedFigures {
    pub fn compute(loans: &[CalculatedLoan], expenses: &[Expense], today: NaiveDate) -> Self {
        let gross_profit = gross_profit(loans);
        let total_expenses = total_expenses(expenses);
        let month_to_date_profit = month_to_date_profit(loans, today);
        let month_to_date_expenses = month_to_date_expenses(expenses, today);

        Self {
            gross_profit,
            total_expenses,
            net_profit: gross_profit - total_expenses,
            month_to_date_profit,
            last_30_days_profit: last_30_days_profit(loans, today),
            month_to_date_expenses,
            month_to_date_net_profit: month_to_date_profit - month_to_date_expenses,
        }
    }
}

/// Σ profit of paid loans
pub fn gross_profit(loans: &[CalculatedLoan]) -> Money {
    loans.iter().filter(|l| l.is_paid()).map(|l| l.profit).sum()
}

pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn net_profit(loans: &[CalculatedLoan], expenses: &[Expense]) -> Money {
    gross_profit(loans) - total_expenses(expenses)
}

/// Σ profit of loans paid in `[from, to]`
///
/// Paid loans without a payment day are left out of every dated window.
pub fn profit_paid_between(loans: &[CalculatedLoan], from: NaiveDate, to: NaiveDate) -> Money {
    loans
        .iter()
        .filter(|l| l.is_paid())
        .filter(|l| matches!(l.paid_date, Some(day) if day >= from && day <= to))
        .map(|l| l.profit)
        .sum()
}

pub fn month_to_date_profit(loans: &[CalculatedLoan], today: NaiveDate) -> Money {
    profit_paid_between(loans, month_start(today), today)
}

pub fn last_30_days_profit(loans: &[CalculatedLoan], today: NaiveDate) -> Money {
    profit_paid_between(loans, today - Duration::days(TRAILING_WINDOW_DAYS), today)
}

pub fn month_to_date_expenses(expenses: &[Expense], today: NaiveDate) -> Money {
    let from = month_start(today);
    expenses
        .iter()
        .filter(|e| e.date >= from && e.date <= today)
        .map(|e| e.amount)
        .sum()
}
