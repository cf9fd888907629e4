//! Allocation models for the portfolio breakdown by ticker.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Share of portfolio value held in a single ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerAllocation {
    pub ticker: String,
    /// Market value at the last traded price
    pub value: Decimal,
    /// Percentage of total portfolio value (0-100)
    pub weight_pct: Decimal,
}
