use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio-wide totals over the current holdings.
///
/// Transaction counts are taken from the ledger, not from holdings, so fully
/// exited tickers still count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub return_pct: Decimal,
    pub total_transactions: usize,
    pub total_buys: usize,
    pub total_sells: usize,
}
