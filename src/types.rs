use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a client
pub type ClientId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for an expense
pub type ExpenseId = Uuid;

/// shared identifier of the installments created from one request
pub type GroupId = Uuid;

/// how `interest_rate` on a loan is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestType {
    /// percent of the principal
    #[default]
    Percentage,
    /// absolute currency amount, independent of the principal
    FixedValue,
}

/// how `penalty_rate` on a loan is read once it is overdue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyType {
    /// one-time percent of the base total
    #[default]
    Fixed,
    /// one-time flat amount
    FixedValue,
    /// percent of the base total per day late
    DailyPercentage,
    /// flat amount per day late
    DailyValue,
}

impl PenaltyType {
    /// penalty grows with days late
    pub fn is_daily(&self) -> bool {
        matches!(self, PenaltyType::DailyPercentage | PenaltyType::DailyValue)
    }
}

/// stored loan status; overdue is always derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    #[default]
    Active,
    Paid,
}

/// display status of a calculated loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStanding {
    Active,
    Overdue,
    Paid,
    /// paid, but after the due date
    PaidLate,
}

/// kind of stored record, used in errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Client,
    Loan,
    Expense,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Client => "client",
            RecordKind::Loan => "loan",
            RecordKind::Expense => "expense",
        };
        f.write_str(name)
    }
}
