use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockjournal_core::ledger::ImportMode;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    pub ticker: Option<String>,
    /// "Buy" or "Sell"
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RestoreQuery {
    pub mode: Option<ImportMode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub removed: usize,
}
