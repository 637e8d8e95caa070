//! The loan book: stores plus the read-side views over them.
//!
//! `LoanBook` is the single session that owns the client, loan and expense collections. Every
//! derived read goes through its [`LoanCalculator`], so the dashboard, the overdue list and the
//! client screen agree on what "overdue" means for a given day.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::aggregation::{overdue_loans, ClientOverview, PortfolioSummary};
use crate::calculation::{CalculatedLoan, LoanCalculator};
use crate::config::LedgerConfig;
use crate::dashboard::Dashboard;
use crate::errors::{LedgerError, Result};
use crate::installments::InstallmentPlan;
use crate::records::{Client, Expense, Loan};
use crate::status::LoanEdit;
use crate::store::{Dataset, InMemoryStore, RecordStore};
use crate::types::{ClientId, ExpenseId, GroupId, LoanId, LoanStatus, RecordKind};

#[derive(Debug, Clone)]
pub struct LoanBook {
    config: LedgerConfig,
    calculator: LoanCalculator,
    clients: InMemoryStore<Client>,
    loans: InMemoryStore<Loan>,
    expenses: InMemoryStore<Expense>,
}

impl LoanBook {
    /// empty book
    pub fn new(config: LedgerConfig) -> Result<Self> {
        Self::with_dataset(config, Dataset::default())
    }

    pub fn with_dataset(config: LedgerConfig, dataset: Dataset) -> Result<Self> {
        config.validate()?;
        let calculator = LoanCalculator::from_config(&config)?;
        Ok(Self {
            config,
            calculator,
            clients: InMemoryStore::from_records(dataset.clients)?,
            loans: InMemoryStore::from_records(dataset.loans)?,
            expenses: InMemoryStore::from_records(dataset.expenses)?,
        })
    }

    pub fn open(config: LedgerConfig, path: &Path) -> Result<Self> {
        Self::with_dataset(config, Dataset::load_from_path(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.dataset().save_to_path(path)
    }

    pub fn dataset(&self) -> Dataset {
        Dataset {
            clients: self.clients.list().to_vec(),
            loans: self.loans.list().to_vec(),
            expenses: self.expenses.list().to_vec(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn calculator(&self) -> &LoanCalculator {
        &self.calculator
    }

    /// calendar day according to the configured offset
    pub fn today(&self, time: &SafeTimeProvider) -> NaiveDate {
        self.calculator.clock().today(time)
    }

    // clients

    pub fn clients(&self) -> &[Client] {
        self.clients.list()
    }

    pub fn client(&self, id: ClientId) -> Result<&Client> {
        self.clients.get(id).ok_or(LedgerError::NotFound {
            kind: RecordKind::Client,
            id,
        })
    }

    pub fn add_client(&mut self, client: Client) -> Result<ClientId> {
        let id = client.id;
        self.clients.add(client)?;
        Ok(id)
    }

    pub fn update_client(&mut self, client: Client) -> Result<()> {
        self.clients.update(client)
    }

    /// loans keep pointing at the removed id and show the unknown-client label
    pub fn delete_client(&mut self, id: ClientId) -> Result<Client> {
        self.clients.delete(id)
    }

    // loans

    pub fn loans(&self) -> &[Loan] {
        self.loans.list()
    }

    pub fn loan(&self, id: LoanId) -> Result<&Loan> {
        self.loans.get(id).ok_or(LedgerError::NotFound {
            kind: RecordKind::Loan,
            id,
        })
    }

    /// siblings created from the same installment request, in installment order
    pub fn installment_group(&self, group_id: GroupId) -> Vec<&Loan> {
        let mut group: Vec<&Loan> = self
            .loans
            .list()
            .iter()
            .filter(|l| l.group_id == Some(group_id))
            .collect();
        group.sort_by_key(|l| l.installment_number);
        group
    }

    pub fn add_loan(&mut self, mut loan: Loan) -> Result<LoanId> {
        loan.normalize_payment()?;
        let id = loan.id;
        self.loans.add(loan)?;
        Ok(id)
    }

    /// expand an installment plan and store every installment
    pub fn create_loans(&mut self, plan: InstallmentPlan, created_at: DateTime<Utc>) -> Result<Vec<LoanId>> {
        let loans = plan.into_loans(created_at)?;
        let ids = loans.iter().map(|l| l.id).collect();
        self.loans.add_many(loans)?;
        Ok(ids)
    }

    pub fn update_loan(&mut self, mut loan: Loan) -> Result<()> {
        loan.normalize_payment()?;
        self.loans.update(loan)
    }

    /// edit form path; only this loan changes, installment siblings are left alone
    pub fn edit_loan(&mut self, id: LoanId, edit: LoanEdit) -> Result<()> {
        self.loan_mut(id)?.apply_edit(edit)?;
        tracing::info!(%id, "loan edited");
        Ok(())
    }

    pub fn delete_loan(&mut self, id: LoanId) -> Result<Loan> {
        self.loans.delete(id)
    }

    /// returns false when the loan was already paid
    pub fn mark_paid(&mut self, id: LoanId, at: DateTime<Utc>) -> Result<bool> {
        let changed = self.loan_mut(id)?.mark_paid(at);
        if changed {
            tracing::info!(%id, paid_at = %at, "loan paid");
        }
        Ok(changed)
    }

    pub fn mark_unpaid(&mut self, id: LoanId) -> Result<bool> {
        let changed = self.loan_mut(id)?.mark_unpaid();
        if changed {
            tracing::info!(%id, "loan reopened");
        }
        Ok(changed)
    }

    pub fn toggle_paid(&mut self, id: LoanId, now: DateTime<Utc>) -> Result<LoanStatus> {
        let status = self.loan_mut(id)?.toggle_paid(now);
        tracing::info!(%id, ?status, "loan status toggled");
        Ok(status)
    }

    fn loan_mut(&mut self, id: LoanId) -> Result<&mut Loan> {
        self.loans.get_mut(id).ok_or(LedgerError::NotFound {
            kind: RecordKind::Loan,
            id,
        })
    }

    // expenses

    pub fn expenses(&self) -> &[Expense] {
        self.expenses.list()
    }

    pub fn add_expense(&mut self, expense: Expense) -> Result<ExpenseId> {
        let id = expense.id;
        self.expenses.add(expense)?;
        Ok(id)
    }

    pub fn update_expense(&mut self, expense: Expense) -> Result<()> {
        self.expenses.update(expense)
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<Expense> {
        self.expenses.delete(id)
    }

    // derived views

    pub fn calculated_loans(&self, today: NaiveDate) -> Vec<CalculatedLoan> {
        self.calculator
            .calculate_all(self.loans.list(), self.clients.list(), today)
    }

    pub fn calculated_loan(&self, id: LoanId, today: NaiveDate) -> Result<CalculatedLoan> {
        let loan = self.loan(id)?;
        Ok(self.calculator.calculate(loan, self.clients.list(), today))
    }

    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        let loans = self.calculated_loans(today);
        Dashboard::build(&loans, self.expenses.list(), today, &self.config.display)
    }

    pub fn portfolio(&self, today: NaiveDate) -> PortfolioSummary {
        PortfolioSummary::compute(&self.calculated_loans(today))
    }

    pub fn client_overview(&self, id: ClientId, today: NaiveDate) -> Result<ClientOverview> {
        let client = self.client(id)?.clone();
        Ok(ClientOverview::build(client, &self.calculated_loans(today)))
    }

    /// active overdue loans, most days late first
    pub fn overdue_loans(&self, today: NaiveDate) -> Vec<CalculatedLoan> {
        overdue_loans(&self.calculated_loans(today))
    }

    // wall-clock variants

    pub fn create_loans_now(&mut self, plan: InstallmentPlan, time: &SafeTimeProvider) -> Result<Vec<LoanId>> {
        self.create_loans(plan, time.now())
    }

    pub fn mark_paid_now(&mut self, id: LoanId, time: &SafeTimeProvider) -> Result<bool> {
        self.mark_paid(id, time.now())
    }

    pub fn toggle_paid_now(&mut self, id: LoanId, time: &SafeTimeProvider) -> Result<LoanStatus> {
        self.toggle_paid(id, time.now())
    }

    pub fn calculated_loans_now(&self, time: &SafeTimeProvider) -> Vec<CalculatedLoan> {
        self.calculated_loans(self.today(time))
    }

    pub fn dashboard_now(&self, time: &SafeTimeProvider) -> Dashboard {
        self.dashboard(self.today(time))
    }

    pub fn client_overview_now(&self, id: ClientId, time: &SafeTimeProvider) -> Result<ClientOverview> {
        self.client_overview(id, self.today(time))
    }

    pub fn overdue_loans_now(&self, time: &SafeTimeProvider) -> Vec<CalculatedLoan> {
        self.overdue_loans(self.today(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{calculate_loan_details, DEFAULT_UNKNOWN_CLIENT};
    use crate::decimal::Money;
    use crate::records::LoanTerms;
    use crate::types::{InterestType, PenaltyType};
    use chrono::{Duration, TimeZone};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn book_with_client() -> (LoanBook, ClientId) {
        let mut book = LoanBook::new(LedgerConfig::utc()).unwrap();
        let id = book.add_client(Client::new("Ana", "11 91234-5678", Utc::now())).unwrap();
        (book, id)
    }

    fn terms(due: NaiveDate) -> LoanTerms {
        LoanTerms::new(Money::from_major(1_000), due)
            .with_interest(InterestType::Percentage, dec!(10))
            .with_penalty(PenaltyType::DailyValue, dec!(10))
    }

    #[test]
    fn test_add_loan_requires_payment_date_when_paid() {
        let (mut book, client) = book_with_client();
        let mut loan = Loan::new(client, terms(d(2024, 1, 10)), Utc::now());
        loan.status = LoanStatus::Paid;

        assert!(matches!(book.add_loan(loan), Err(LedgerError::MissingPaymentDate { .. })));
        assert!(book.loans().is_empty());
    }

    #[test]
    fn test_payment_flow_with_test_time() {
        let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 12, 9, 0, 0).unwrap()));
        let control = time.test_control().unwrap();
        let (mut book, client) = book_with_client();
        let id = book.add_loan(Loan::new(client, terms(d(2024, 1, 10)), time.now())).unwrap();

        let overdue = book.overdue_loans_now(&time);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].days_overdue, 2);

        control.advance(Duration::days(3));
        assert!(book.mark_paid_now(id, &time).unwrap());

        // paid on the 15th: frozen at 5 days late from now on
        control.advance(Duration::days(40));
        let calc = book.calculated_loan(id, book.today(&time)).unwrap();
        assert_eq!(calc.days_overdue, 5);
        assert_eq!(calc.penalty_amount, Money::from_major(50));
        assert!(book.overdue_loans_now(&time).is_empty());
    }

    #[test]
    fn test_toggle_and_edit() {
        let (mut book, client) = book_with_client();
        let id = book.add_loan(Loan::new(client, terms(d(2024, 1, 10)), Utc::now())).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap();

        assert_eq!(book.toggle_paid(id, now).unwrap(), LoanStatus::Paid);
        assert!(!book.mark_paid(id, Utc::now()).unwrap());
        assert_eq!(book.loan(id).unwrap().paid_at, Some(now));

        let mut edit = LoanEdit::from_loan(book.loan(id).unwrap());
        edit.status = LoanStatus::Active;
        book.edit_loan(id, edit).unwrap();
        assert!(book.loan(id).unwrap().paid_at.is_none());
        assert!(!book.mark_unpaid(id).unwrap());
    }

    #[test]
    fn test_installments_are_independent() {
        let (mut book, client) = book_with_client();
        let plan = InstallmentPlan::builder()
            .client(client)
            .total(Money::from_major(3_000))
            .installments(3)
            .first_due_date(d(2024, 2, 1))
            .build()
            .unwrap();
        let ids = book.create_loans(plan, Utc::now()).unwrap();
        assert_eq!(ids.len(), 3);

        let group = book.loan(ids[0]).unwrap().group_id.unwrap();
        book.mark_paid(ids[1], Utc::now()).unwrap();

        let mut edit = LoanEdit::from_loan(book.loan(ids[0]).unwrap());
        edit.terms.amount = Money::from_major(5);
        book.edit_loan(ids[0], edit).unwrap();

        let siblings = book.installment_group(group);
        assert_eq!(siblings.len(), 3);
        assert_eq!(siblings[0].amount, Money::from_major(5));
        assert_eq!(siblings[1].amount, Money::from_major(1_000));
        assert!(siblings[1].is_paid());
        assert!(!siblings[2].is_paid());
    }

    #[test]
    fn test_deleting_client_keeps_loans() {
        let (mut book, client) = book_with_client();
        book.add_loan(Loan::new(client, terms(d(2024, 1, 10)), Utc::now())).unwrap();
        book.delete_client(client).unwrap();

        let calculated = book.calculated_loans(d(2024, 1, 1));
        assert_eq!(calculated.len(), 1);
        assert_eq!(calculated[0].client_name, DEFAULT_UNKNOWN_CLIENT);
        assert!(matches!(book.client_overview(client, d(2024, 1, 1)), Err(LedgerError::NotFound { .. })));
    }

    #[test]
    fn test_missing_records() {
        let (mut book, _) = book_with_client();
        let ghost = uuid::Uuid::new_v4();
        assert!(matches!(book.mark_paid(ghost, Utc::now()), Err(LedgerError::NotFound { kind: RecordKind::Loan, .. })));
        assert!(book.delete_expense(ghost).is_err());
        assert!(book.client(ghost).is_err());
    }

    #[test]
    fn test_today_uses_configured_offset() {
        // 02:00 utc on march 2nd is still march 1st in sao paulo
        let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 3, 2, 2, 0, 0).unwrap()));
        let brazil = LoanBook::new(LedgerConfig::brazil()).unwrap();
        let utc = LoanBook::new(LedgerConfig::utc()).unwrap();
        assert_eq!(brazil.today(&time), d(2024, 3, 1));
        assert_eq!(utc.today(&time), d(2024, 3, 2));
    }

    #[test]
    fn test_free_calculation_agrees_with_default_book() {
        let mut book = LoanBook::new(LedgerConfig::default()).unwrap();
        let client = book.add_client(Client::new("Ana", "1", Utc::now())).unwrap();
        let id = book.add_loan(Loan::new(client, terms(d(2024, 1, 10)), Utc::now())).unwrap();
        // 01:00 utc on jan 11th is still the due date in sao paulo
        book.mark_paid(id, Utc.with_ymd_and_hms(2024, 1, 11, 1, 0, 0).unwrap()).unwrap();

        let today = d(2024, 2, 1);
        let from_book = book.calculated_loan(id, today).unwrap();
        let loan = book.loan(id).unwrap().clone();
        assert_eq!(calculate_loan_details(&loan, book.clients(), today), from_book);
        assert_eq!(from_book.days_overdue, 0);
    }
}
