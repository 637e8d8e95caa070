use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calculation::CalculatedLoan;
use crate::decimal::Money;
use crate::records::Client;
use crate::types::ClientId;

/// realized profit earned from one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfit {
    pub client_id: ClientId,
    pub client_name: String,
    pub profit: Money,
    pub paid_loans: usize,
}

/// profit of paid loans per client, most profitable first
///
/// Clients whose total is zero or negative are dropped. Ties keep a stable order by name.
pub fn profit_by_client(loans: &[CalculatedLoan]) -> Vec<ClientProfit> {
    let mut totals: HashMap<ClientId, ClientProfit> = HashMap::new();
    for loan in loans.iter().filter(|l| l.is_paid()) {
        let entry = totals.entry(loan.loan.client_id).or_insert_with(|| ClientProfit {
            client_id: loan.loan.client_id,
            client_name: loan.client_name.clone(),
            profit: Money::ZERO,
            paid_loans: 0,
        });
        entry.profit += loan.profit;
        entry.paid_loans += 1;
    }

    let mut ranking: Vec<ClientProfit> = totals
        .into_values()
        .filter(|c| c.profit.is_positive())
        .collect();
    ranking.sort_by(|a, b| {
        b.profit
            .cmp(&a.profit)
            .then_with(|| a.client_name.cmp(&b.client_name))
    });
    ranking
}

/// one client's loans with their running totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOverview {
    pub client: Client,
    pub loans: Vec<CalculatedLoan>,
    /// Σ principal over every loan
    pub total_borrowed: Money,
    /// Σ final total of paid loans
    pub total_received: Money,
    /// Σ final total of active loans
    pub total_open: Money,
    /// Σ profit of paid loans
    pub total_profit: Money,
    pub overdue_loans: usize,
}

impl ClientOverview {
    /// overview over the loans that belong to `client`; others in `loans` are ignored
    pub fn build(client: Client, loans: &[CalculatedLoan]) -> Self {
        let own: Vec<CalculatedLoan> = loans
            .iter()
            .filter(|l| l.loan.client_id == client.id)
            .cloned()
            .collect();

        let mut overview = ClientOverview {
            client,
            loans: Vec::new(),
            total_borrowed: Money::ZERO,
            total_received: Money::ZERO,
            total_open: Money::ZERO,
            total_profit: Money::ZERO,
            overdue_loans: 0,
        };
        for loan in &own {
            overview.total_borrowed += loan.loan.amount;
            if loan.is_paid() {
                overview.total_received += loan.final_total;
                overview.total_profit += loan.profit;
            } else {
                overview.total_open += loan.final_total;
                if loan.is_overdue {
                    overview.overdue_loans += 1;
                }
            }
        }
        overview.loans = own;
        overview
    }
}
