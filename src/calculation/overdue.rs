use chrono::NaiveDate;

use crate::calendar::days_between;
use crate::types::LoanStatus;

/// lateness of a loan as of its reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverdueAssessment {
    /// payment day for paid loans, today otherwise
    pub reference_date: NaiveDate,
    pub is_overdue: bool,
    pub days_overdue: u32,
}

/// judge a paid loan by the day it was paid and an open loan by today
///
/// A loan stored as paid without a payment day falls back to today and is never overdue.
pub fn assess_overdue(
    status: LoanStatus,
    due_date: NaiveDate,
    paid_date: Option<NaiveDate>,
    today: NaiveDate,
) -> OverdueAssessment {
    let (reference_date, is_overdue) = match (status, paid_date) {
        (LoanStatus::Paid, Some(paid)) => (paid, paid > due_date),
        _ => (today, status != LoanStatus::Paid && today > due_date),
    };

    let days_overdue = if is_overdue {
        let days = days_between(due_date, reference_date).max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    } else {
        0
    };

    OverdueAssessment {
        reference_date,
        is_overdue,
        days_overdue,
    }
}
