pub mod aggregation;
pub mod book;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod currency;
pub mod dashboard;
pub mod decimal;
pub mod errors;
pub mod installments;
pub mod logging;
pub mod records;
pub mod status;
pub mod store;
pub mod types;

// re-export key types
pub use aggregation::{
    ClientOverview, ClientProfit, CategoryTotal, Forecast, MonthlyBucket, PortfolioSummary,
    RealizedFigures,
};
pub use book::LoanBook;
pub use calculation::{calculate_loan_details, CalculatedLoan, LoanCalculator};
pub use calendar::{CalendarClock, Period};
pub use config::LedgerConfig;
pub use currency::{format_currency, parse_amount, CurrencyFormat};
pub use dashboard::Dashboard;
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use installments::{InstallmentPlan, InstallmentPlanBuilder};
pub use records::{Client, Expense, Loan, LoanTerms, Record};
pub use status::LoanEdit;
pub use store::{Dataset, InMemoryStore, RecordStore};
pub use types::{
    ClientId, ExpenseId, GroupId, InterestType, LoanId, LoanStanding, LoanStatus, PenaltyType,
    RecordKind,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
