use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::CalculatedLoan;
use crate::calendar::month_start;
use crate::decimal::Money;
use crate::records::Expense;

/// state of the open book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_loans: usize,
    pub active_loans: usize,
    pub overdue_loans: usize,
    pub paid_loans: usize,
    /// Σ principal of active loans
    pub outstanding_principal: Money,
    /// Σ final total of active loans
    pub outstanding_receivable: Money,
    /// Σ final total of overdue loans
    pub overdue_receivable: Money,
}

impl PortfolioSummary {
    pub fn compute(loans: &[CalculatedLoan]) -> Self {
        let mut summary = PortfolioSummary {
            total_loans: loans.len(),
            ..Default::default()
        };
        for loan in loans {
            if loan.is_paid() {
                summary.paid_loans += 1;
                continue;
            }
            summary.active_loans += 1;
            summary.outstanding_principal += loan.loan.amount;
            summary.outstanding_receivable += loan.final_total;
            if loan.is_overdue {
                summary.overdue_loans += 1;
                summary.overdue_receivable += loan.final_total;
            }
        }
        summary
    }
}

/// active overdue loans, most days late first
pub fn overdue_loans(loans: &[CalculatedLoan]) -> Vec<CalculatedLoan> {
    let mut overdue: Vec<CalculatedLoan> = loans
        .iter()
        .filter(|l| l.is_active() && l.is_overdue)
        .cloned()
        .collect();
    overdue.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    overdue
}

/// spending under one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// expenses grouped by category, largest total first
///
/// Expenses with no category (or a blank one) land under `uncategorized_label`.
pub fn expenses_by_category(expenses: &[Expense], uncategorized_label: &str) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<String, CategoryTotal> = BTreeMap::new();
    for expense in expenses {
        let label = expense
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(uncategorized_label);
        let entry = groups.entry(label.to_string()).or_insert_with(|| CategoryTotal {
            category: label.to_string(),
            total: Money::ZERO,
            count: 0,
        });
        entry.total += expense.amount;
        entry.count += 1;
    }

    let mut totals: Vec<CategoryTotal> = groups.into_values().collect();
    // stable: equal totals stay alphabetical
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// expenses dated in the current month up to today, newest first
pub fn expenses_this_month(expenses: &[Expense], today: NaiveDate) -> Vec<Expense> {
    let from = month_start(today);
    let mut current: Vec<Expense> = expenses
        .iter()
        .filter(|e| e.date >= from && e.date <= today)
        .cloned()
        .collect();
    current.sort_by(|a, b| b.date.cmp(&a.date));
    current
}
