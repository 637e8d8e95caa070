use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{ClientId, GroupId, InterestType, LoanId, LoanStatus, PenaltyType};

/// the financial terms a loan is created or edited with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    /// principal
    pub amount: Money,
    /// percent or currency amount, per `interest_type`
    pub interest_rate: Decimal,
    pub interest_type: InterestType,
    pub due_date: NaiveDate,
    /// percent or currency amount, per `penalty_type`
    pub penalty_rate: Decimal,
    pub penalty_type: PenaltyType,
}

impl LoanTerms {
    /// principal due on a date, no interest, no penalty
    pub fn new(amount: Money, due_date: NaiveDate) -> Self {
        Self {
            amount,
            interest_rate: Decimal::ZERO,
            interest_type: InterestType::Percentage,
            due_date,
            penalty_rate: Decimal::ZERO,
            penalty_type: PenaltyType::Fixed,
        }
    }

    pub fn with_interest(mut self, interest_type: InterestType, rate: Decimal) -> Self {
        self.interest_type = interest_type;
        self.interest_rate = rate;
        self
    }

    pub fn with_penalty(mut self, penalty_type: PenaltyType, rate: Decimal) -> Self {
        self.penalty_type = penalty_type;
        self.penalty_rate = rate;
        self
    }
}

/// a single repayment obligation as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub client_id: ClientId,
    pub amount: Money,
    pub interest_rate: Decimal,
    #[serde(default)]
    pub interest_type: InterestType,
    pub due_date: NaiveDate,
    pub penalty_rate: Decimal,
    #[serde(default)]
    pub penalty_type: PenaltyType,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
    /// present exactly when `status` is paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
}

impl Loan {
    /// create an active loan
    pub fn new(client_id: ClientId, terms: LoanTerms, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            amount: terms.amount,
            interest_rate: terms.interest_rate,
            interest_type: terms.interest_type,
            due_date: terms.due_date,
            penalty_rate: terms.penalty_rate,
            penalty_type: terms.penalty_type,
            status: LoanStatus::Active,
            created_at,
            paid_at: None,
            installment_number: None,
            installment_total: None,
            group_id: None,
        }
    }

    /// current financial terms
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            amount: self.amount,
            interest_rate: self.interest_rate,
            interest_type: self.interest_type,
            due_date: self.due_date,
            penalty_rate: self.penalty_rate,
            penalty_type: self.penalty_type,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == LoanStatus::Paid
    }

    /// part of a multi-installment request
    pub fn is_installment(&self) -> bool {
        self.group_id.is_some()
    }
}
