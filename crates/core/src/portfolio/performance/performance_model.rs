use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market value of the whole portfolio as of the end of one ledger date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
}

impl PerformancePoint {
    /// A series needs at least two points to show a trend.
    pub fn is_trend(series: &[PerformancePoint]) -> bool {
        series.len() >= 2
    }
}
