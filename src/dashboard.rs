//! Serializable dashboard snapshot.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::{
    expenses_by_category, monthly_profit_series, profit_by_client, CategoryTotal, ClientProfit,
    Forecast, MonthlyBucket, PortfolioSummary, RealizedFigures,
};
use crate::calculation::CalculatedLoan;
use crate::calendar::Period;
use crate::config::DisplayConfig;
use crate::currency::{format_currency, CurrencyFormat};
use crate::records::Expense;

/// clients listed in the profit ranking
pub const TOP_CLIENTS: usize = 5;

/// everything the overview screen shows, computed for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub as_of: NaiveDate,
    pub realized: RealizedFigures,
    pub forecasts: Vec<Forecast>,
    pub monthly_profit: Vec<MonthlyBucket>,
    pub top_clients: Vec<ClientProfit>,
    pub portfolio: PortfolioSummary,
    pub expenses_by_category: Vec<CategoryTotal>,
}

impl Dashboard {
    pub fn build(
        loans: &[CalculatedLoan],
        expenses: &[Expense],
        today: NaiveDate,
        display: &DisplayConfig,
    ) -> Self {
        let mut top_clients = profit_by_client(loans);
        top_clients.truncate(TOP_CLIENTS);

        let dashboard = Dashboard {
            as_of: today,
            realized: RealizedFigures::compute(loans, expenses, today),
            forecasts: Forecast::all(loans, today),
            monthly_profit: monthly_profit_series(
                loans,
                today,
                display.series_months,
                display.chart_max_height,
            ),
            top_clients,
            portfolio: PortfolioSummary::compute(loans),
            expenses_by_category: expenses_by_category(expenses, &display.uncategorized_label),
        };
        tracing::debug!(
            %today,
            loans = loans.len(),
            expenses = expenses.len(),
            "dashboard built"
        );
        dashboard
    }

    pub fn forecast(&self, period: Period) -> Option<&Forecast> {
        self.forecasts.iter().find(|f| f.period == period)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// plain-text report, one figure per line
    pub fn render(&self, format: &CurrencyFormat) -> String {
        let money = |amount| format_currency(amount, format);
        let mut lines = vec![
            format!("Resumo em {}", self.as_of.format("%d/%m/%Y")),
            format!("Lucro bruto: {}", money(self.realized.gross_profit)),
            format!("Despesas: {}", money(self.realized.total_expenses)),
            format!("Lucro líquido: {}", money(self.realized.net_profit)),
            format!("Lucro no mês: {}", money(self.realized.month_to_date_profit)),
            format!("Lucro 30 dias: {}", money(self.realized.last_30_days_profit)),
        ];

        for forecast in &self.forecasts {
            lines.push(format!(
                "Previsão ({}): juros {} / a receber {}",
                period_label(forecast.period),
                money(forecast.interest),
                money(forecast.receivable)
            ));
        }

        lines.push(format!(
            "Carteira: {} ativos, {} atrasados, {} a receber",
            self.portfolio.active_loans,
            self.portfolio.overdue_loans,
            money(self.portfolio.outstanding_receivable)
        ));

        for bucket in &self.monthly_profit {
            lines.push(format!(
                "{}/{} {:>3} {}",
                bucket.label,
                bucket.year,
                bucket.height,
                money(bucket.value)
            ));
        }

        for (rank, client) in self.top_clients.iter().enumerate() {
            lines.push(format!("{}. {} {}", rank + 1, client.client_name, money(client.profit)));
        }

        lines.join("\n")
    }
}

fn period_label(period: Period) -> &'static str {
    match period {
        Period::Today => "hoje",
        Period::Week => "semana",
        Period::Month => "mês",
        Period::Year => "ano",
    }
}
