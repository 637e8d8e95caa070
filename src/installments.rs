//! Installment plans: one lending request split into sibling loans.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calendar::add_months;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::records::{Loan, LoanTerms};
use crate::types::{ClientId, InterestType, LoanStatus, PenaltyType};

/// a request for `count` monthly installments totalling `total`
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentPlan {
    pub client_id: ClientId,
    pub total: Money,
    pub count: u32,
    pub first_due_date: NaiveDate,
    pub interest_type: InterestType,
    pub interest_rate: Decimal,
    pub penalty_type: PenaltyType,
    pub penalty_rate: Decimal,
    /// backdated payment shared by every installment
    pub paid_at: Option<DateTime<Utc>>,
}

impl InstallmentPlan {
    pub fn builder() -> InstallmentPlanBuilder {
        InstallmentPlanBuilder::new()
    }

    /// principal carried by each installment
    ///
    /// The division is not rebalanced, so the parts may sum to a hair under `total`.
    pub fn installment_amount(&self) -> Money {
        self.total.split(self.count)
    }

    /// due date of the installment at `index` (0-based), clamped to the month end
    pub fn due_date(&self, index: u32) -> NaiveDate {
        add_months(self.first_due_date, index)
    }

    /// expand into loans; a single installment is a plain loan with no group
    pub fn into_loans(self, created_at: DateTime<Utc>) -> Result<Vec<Loan>> {
        if self.count == 0 {
            return Err(LedgerError::InvalidInstallmentCount { count: self.count });
        }

        let amount = self.installment_amount();
        let group_id = (self.count > 1).then(Uuid::new_v4);

        let loans = (0..self.count)
            .map(|index| {
                let terms = LoanTerms::new(amount, self.due_date(index))
                    .with_interest(self.interest_type, self.interest_rate)
                    .with_penalty(self.penalty_type, self.penalty_rate);
                let mut loan = Loan::new(self.client_id, terms, created_at);
                if let Some(group) = group_id {
                    loan.group_id = Some(group);
                    loan.installment_number = Some(index + 1);
                    loan.installment_total = Some(self.count);
                }
                if let Some(at) = self.paid_at {
                    loan.status = LoanStatus::Paid;
                    loan.paid_at = Some(at);
                }
                loan
            })
            .collect();
        Ok(loans)
    }
}

/// builder for installment plans
#[derive(Debug, Default)]
pub struct InstallmentPlanBuilder {
    client_id: Option<ClientId>,
    total: Option<Money>,
    count: Option<u32>,
    first_due_date: Option<NaiveDate>,
    interest: Option<(InterestType, Decimal)>,
    penalty: Option<(PenaltyType, Decimal)>,
    paid_at: Option<DateTime<Utc>>,
}

impl InstallmentPlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn total(mut self, total: Money) -> Self {
        self.total = Some(total);
        self
    }

    /// defaults to 1
    pub fn installments(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn first_due_date(mut self, date: NaiveDate) -> Self {
        self.first_due_date = Some(date);
        self
    }

    pub fn interest(mut self, interest_type: InterestType, rate: Decimal) -> Self {
        self.interest = Some((interest_type, rate));
        self
    }

    pub fn penalty(mut self, penalty_type: PenaltyType, rate: Decimal) -> Self {
        self.penalty = Some((penalty_type, rate));
        self
    }

    /// enter the plan as already paid
    pub fn paid_at(mut self, at: DateTime<Utc>) -> Self {
        self.paid_at = Some(at);
        self
    }

    pub fn build(self) -> Result<InstallmentPlan> {
        let client_id = self.client_id.ok_or_else(|| missing("client"))?;
        let total = self.total.ok_or_else(|| missing("total"))?;
        let first_due_date = self.first_due_date.ok_or_else(|| missing("first due date"))?;

        let count = self.count.unwrap_or(1);
        if count == 0 {
            return Err(LedgerError::InvalidInstallmentCount { count });
        }

        let (interest_type, interest_rate) = self.interest.unwrap_or_default();
        let (penalty_type, penalty_rate) = self.penalty.unwrap_or_default();

        Ok(InstallmentPlan {
            client_id,
            total,
            count,
            first_due_date,
            interest_type,
            interest_rate,
            penalty_type,
            penalty_rate,
            paid_at: self.paid_at,
        })
    }
}

fn missing(field: &str) -> LedgerError {
    LedgerError::InvalidConfiguration {
        message: format!("installment plan is missing its {field}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn plan(count: u32) -> InstallmentPlanBuilder {
        InstallmentPlan::builder()
            .client(Uuid::new_v4())
            .total(Money::from_major(1_200))
            .installments(count)
            .first_due_date(d(2024, 1, 31))
            .interest(InterestType::Percentage, dec!(10))
            .penalty(PenaltyType::DailyValue, dec!(2))
    }

    #[test]
    fn test_split_into_monthly_installments() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let loans = plan(3).build().unwrap().into_loans(created).unwrap();

        assert_eq!(loans.len(), 3);
        let group = loans[0].group_id.expect("grouped");
        for (i, loan) in loans.iter().enumerate() {
            assert_eq!(loan.amount, Money::from_major(400));
            assert_eq!(loan.interest_rate, dec!(10));
            assert_eq!(loan.penalty_type, PenaltyType::DailyValue);
            assert_eq!(loan.group_id, Some(group));
            assert_eq!(loan.installment_number, Some(i as u32 + 1));
            assert_eq!(loan.installment_total, Some(3));
            assert_eq!(loan.status, LoanStatus::Active);
            assert_eq!(loan.created_at, created);
        }

        let dues: Vec<NaiveDate> = loans.iter().map(|l| l.due_date).collect();
        assert_eq!(dues, vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31)]);
    }

    #[test]
    fn test_single_installment_is_plain_loan() {
        let loans = plan(1).build().unwrap().into_loans(Utc::now()).unwrap();
        assert_eq!(loans.len(), 1);
        assert!(loans[0].group_id.is_none());
        assert!(loans[0].installment_number.is_none());
        assert!(!loans[0].is_installment());
    }

    #[test]
    fn test_zero_installments_rejected() {
        assert!(matches!(
            plan(0).build(),
            Err(LedgerError::InvalidInstallmentCount { count: 0 })
        ));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let result = InstallmentPlan::builder().total(Money::from_major(1)).build();
        assert!(matches!(result, Err(LedgerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_uneven_split_is_not_rebalanced() {
        let plan = InstallmentPlan::builder()
            .client(Uuid::new_v4())
            .total(Money::from_major(100))
            .installments(3)
            .first_due_date(d(2024, 1, 1))
            .build()
            .unwrap();
        let sum: Money = plan.clone().into_loans(Utc::now()).unwrap().iter().map(|l| l.amount).sum();
        assert_eq!(plan.installment_amount(), Money::from_str_exact("33.33333333").unwrap());
        assert!(sum < Money::from_major(100));
    }

    #[test]
    fn test_backdated_plan_is_paid() {
        let paid = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
        let loans = plan(2).paid_at(paid).build().unwrap().into_loans(Utc::now()).unwrap();
        assert!(loans.iter().all(|l| l.is_paid() && l.paid_at == Some(paid)));
    }
}
