//! Aggregation and forecast over calculated loans.
//!
//! Every function here takes the full calculated collection and recomputes from scratch; nothing
//! is cached between reads.

pub mod clients;
pub mod forecast;
pub mod portfolio;
pub mod realized;
pub mod series;

pub use clients::{profit_by_client, ClientOverview, ClientProfit};
pub use forecast::{forecast_interest, forecast_receivable, Forecast};
pub use portfolio::{expenses_by_category, expenses_this_month, overdue_loans, CategoryTotal, PortfolioSummary};
pub use realized::{
    gross_profit, last_30_days_profit, month_to_date_expenses, month_to_date_profit, net_profit,
    profit_paid_between, total_expenses, RealizedFigures,
};
pub use series::{monthly_profit_series, MonthlyBucket};
