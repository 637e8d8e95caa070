pub mod client;
pub mod expense;
pub mod loan;

use uuid::Uuid;

use crate::types::RecordKind;

pub use client::Client;
pub use expense::Expense;
pub use loan::{Loan, LoanTerms};

/// a stored record with an immutable identity
pub trait Record: Clone {
    const KIND: RecordKind;

    fn id(&self) -> Uuid;
}

impl Record for Client {
    const KIND: RecordKind = RecordKind::Client;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Loan {
    const KIND: RecordKind = RecordKind::Loan;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Expense {
    const KIND: RecordKind = RecordKind::Expense;

    fn id(&self) -> Uuid {
        self.id
    }
}
