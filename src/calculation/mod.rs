//! Loan calculation engine.
//!
//! Turns a stored [`Loan`] plus the calendar day into a [`CalculatedLoan`]: interest, lateness,
//! penalty, totals and the borrower's display name. Every consumer derives overdue figures
//! through [`LoanCalculator`]; nothing derived is ever stored.

pub mod interest;
pub mod overdue;
pub mod penalty;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarClock;
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::records::{Client, Loan};
use crate::types::{ClientId, LoanStanding};

pub use interest::{calculate_interest, InterestCalculation};
pub use overdue::{assess_overdue, OverdueAssessment};
pub use penalty::{PenaltyCalculation, PenaltyConfig, PenaltyEngine};

/// label used when a loan points at a client that is not in the roster
pub const DEFAULT_UNKNOWN_CLIENT: &str = "Cliente Desconhecido";

/// a loan with every derived financial figure resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedLoan {
    #[serde(flatten)]
    pub loan: Loan,
    pub client_name: String,
    pub initial_interest: Money,
    /// principal plus interest
    pub base_total: Money,
    pub is_overdue: bool,
    pub days_overdue: u32,
    pub penalty_amount: Money,
    /// base total plus penalty
    pub final_total: Money,
    /// interest plus penalty
    pub profit: Money,
    /// calendar day of `paid_at`
    pub paid_date: Option<NaiveDate>,
    /// day lateness was judged on
    pub reference_date: NaiveDate,
}

impl CalculatedLoan {
    pub fn is_paid(&self) -> bool {
        self.loan.is_paid()
    }

    /// not paid; overdue loans are still active
    pub fn is_active(&self) -> bool {
        !self.loan.is_paid()
    }

    pub fn standing(&self) -> LoanStanding {
        match (self.is_paid(), self.is_overdue) {
            (true, true) => LoanStanding::PaidLate,
            (true, false) => LoanStanding::Paid,
            (false, true) => LoanStanding::Overdue,
            (false, false) => LoanStanding::Active,
        }
    }
}

/// client id -> display name lookup built once per roster
pub struct ClientDirectory<'a> {
    names: HashMap<ClientId, &'a str>,
}

impl<'a> ClientDirectory<'a> {
    pub fn new(clients: &'a [Client]) -> Self {
        let names = clients
            .iter()
            .map(|client| (client.id, client.name.as_str()))
            .collect();
        Self { names }
    }

    pub fn name(&self, id: &ClientId) -> Option<&'a str> {
        self.names.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// the one place loans are turned into calculated loans
#[derive(Debug, Clone)]
pub struct LoanCalculator {
    clock: CalendarClock,
    unknown_client_label: String,
}

impl LoanCalculator {
    pub fn new(clock: CalendarClock, unknown_client_label: impl Into<String>) -> Self {
        Self {
            clock,
            unknown_client_label: unknown_client_label.into(),
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Result<Self> {
        Ok(Self::new(config.clock()?, config.display.unknown_client_label.clone()))
    }

    pub fn clock(&self) -> CalendarClock {
        self.clock
    }

    /// calculate one loan against a client roster
    pub fn calculate(&self, loan: &Loan, clients: &[Client], today: NaiveDate) -> CalculatedLoan {
        let client_name = clients
            .iter()
            .find(|client| client.id == loan.client_id)
            .map(|client| client.name.as_str());
        self.calculate_named(loan, client_name, today)
    }

    /// calculate every loan, in input order
    pub fn calculate_all(&self, loans: &[Loan], clients: &[Client], today: NaiveDate) -> Vec<CalculatedLoan> {
        let directory = ClientDirectory::new(clients);
        let calculated: Vec<CalculatedLoan> = loans
            .iter()
            .map(|loan| self.calculate_named(loan, directory.name(&loan.client_id), today))
            .collect();

        tracing::debug!(
            loans = calculated.len(),
            clients = directory.len(),
            %today,
            "calculated loan snapshots"
        );
        calculated
    }

    fn calculate_named(&self, loan: &Loan, client_name: Option<&str>, today: NaiveDate) -> CalculatedLoan {
        let interest = calculate_interest(loan.amount, loan.interest_rate, loan.interest_type);

        let paid_date = loan.paid_at.map(|at| self.clock.date_of(at));
        let overdue = assess_overdue(loan.status, loan.due_date, paid_date, today);

        let penalty = PenaltyEngine::new(PenaltyConfig::new(loan.penalty_type, loan.penalty_rate))
            .calculate_penalty(interest.base_total, &overdue);

        let final_total = interest.base_total + penalty.penalty_amount;
        let profit = final_total - loan.amount;

        CalculatedLoan {
            loan: loan.clone(),
            client_name: client_name
                .map(str::to_string)
                .unwrap_or_else(|| self.unknown_client_label.clone()),
            initial_interest: interest.initial_interest,
            base_total: interest.base_total,
            is_overdue: overdue.is_overdue,
            days_overdue: overdue.days_overdue,
            penalty_amount: penalty.penalty_amount,
            final_total,
            profit,
            paid_date,
            reference_date: overdue.reference_date,
        }
    }
}

impl Default for LoanCalculator {
    /// same calendar and unknown-client label as `LedgerConfig::default()`
    fn default() -> Self {
        Self::new(CalendarClock::sao_paulo(), DEFAULT_UNKNOWN_CLIENT)
    }
}

/// calculate a single loan with the default calculator (sao paulo calendar)
pub fn calculate_loan_details(loan: &Loan, clients: &[Client], today: NaiveDate) -> CalculatedLoan {
    LoanCalculator::default().calculate(loan, clients, today)
}
