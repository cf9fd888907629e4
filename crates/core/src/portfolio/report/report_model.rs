use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Realized and unrealized profit/loss of one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossRow {
    pub ticker: String,
    /// Sum of Buy totals
    pub buy_cost: Decimal,
    /// Sum of |Sell totals|
    pub sell_revenue: Decimal,
    /// Average buy cost x shares sold
    pub cost_basis_sold: Decimal,
    pub realized_profit_loss: Decimal,
    /// Zero when the position is closed
    pub unrealized_profit_loss: Decimal,
    pub total_profit_loss: Decimal,
}
