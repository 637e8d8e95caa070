//! Stored status transitions.
//!
//! Only `Active` and `Paid` are ever stored; overdue is read off the calculated loan. Paying sets
//! `paid_at`, the edit path may revert a paid loan to active and clears it again. Nothing here
//! touches sibling installments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};
use crate::records::{Loan, LoanTerms};
use crate::types::{ClientId, LoanStatus};

/// full replacement of a loan's editable fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanEdit {
    pub client_id: ClientId,
    pub terms: LoanTerms,
    pub status: LoanStatus,
    /// required when `status` is paid, ignored otherwise
    pub paid_at: Option<DateTime<Utc>>,
}

impl LoanEdit {
    /// edit that keeps the loan's current values
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            client_id: loan.client_id,
            terms: loan.terms(),
            status: loan.status,
            paid_at: loan.paid_at,
        }
    }
}

impl Loan {
    /// active -> paid; a loan that is already paid keeps its original payment date
    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_paid() {
            return false;
        }
        self.status = LoanStatus::Paid;
        self.paid_at = Some(at);
        true
    }

    /// paid -> active, dropping the payment date
    pub fn mark_unpaid(&mut self) -> bool {
        if !self.is_paid() {
            return false;
        }
        self.status = LoanStatus::Active;
        self.paid_at = None;
        true
    }

    /// flip between active and paid, paying at `now`
    pub fn toggle_paid(&mut self, now: DateTime<Utc>) -> LoanStatus {
        if self.is_paid() {
            self.mark_unpaid();
        } else {
            self.mark_paid(now);
        }
        self.status
    }

    /// replace every editable field; id, creation time and installment metadata are kept
    pub fn apply_edit(&mut self, edit: LoanEdit) -> Result<()> {
        let paid_at = match edit.status {
            LoanStatus::Paid => Some(edit.paid_at.ok_or(LedgerError::MissingPaymentDate { id: self.id })?),
            LoanStatus::Active => None,
        };

        self.client_id = edit.client_id;
        self.amount = edit.terms.amount;
        self.interest_rate = edit.terms.interest_rate;
        self.interest_type = edit.terms.interest_type;
        self.due_date = edit.terms.due_date;
        self.penalty_rate = edit.terms.penalty_rate;
        self.penalty_type = edit.terms.penalty_type;
        self.status = edit.status;
        self.paid_at = paid_at;
        Ok(())
    }

    /// enforce `paid_at` present exactly when paid; a stray date on an active loan is dropped
    pub fn normalize_payment(&mut self) -> Result<()> {
        match self.status {
            LoanStatus::Paid if self.paid_at.is_none() => {
                Err(LedgerError::MissingPaymentDate { id: self.id })
            }
            LoanStatus::Paid => Ok(()),
            LoanStatus::Active => {
                self.paid_at = None;
                Ok(())
            }
        }
    }
}
