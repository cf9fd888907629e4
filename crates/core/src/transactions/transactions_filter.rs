use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_model::{Transaction, TransactionType};
use crate::utils::decimal_utils::{ratio_or_zero, round_display};

/// Optional predicates over ledger rows. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub ticker: Option<String>,
    pub transaction_type: Option<TransactionType>,
    /// Inclusive
    pub start_date: Option<NaiveDate>,
    /// Inclusive
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let ticker_ok = match self.ticker.as_deref().map(str::trim) {
            Some(ticker) if !ticker.is_empty() => transaction.ticker.eq_ignore_ascii_case(ticker),
            _ => true,
        };
        ticker_ok
            && self
                .transaction_type
                .map_or(true, |t| transaction.transaction_type == t)
            && self.start_date.map_or(true, |d| transaction.date >= d)
            && self.end_date.map_or(true, |d| transaction.date <= d)
    }
}

/// Rows matching every set predicate, in their original order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}

/// Buy and sell aggregates of one ticker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummaryRow {
    pub ticker: String,
    pub buy_shares: u64,
    pub buy_avg_price: Decimal,
    pub buy_total: Decimal,
    pub sell_shares: u64,
    pub sell_avg_price: Decimal,
    /// Absolute value of the sell totals
    pub sell_total: Decimal,
    pub net_shares: i64,
}

/// Per-ticker buy/sell aggregates sorted by ticker. Average prices are
/// `total / shares`, zero for a side with no shares.
pub fn generate_transaction_summary(transactions: &[Transaction]) -> Vec<TransactionSummaryRow> {
    let mut grouped: BTreeMap<&str, TransactionSummaryRow> = BTreeMap::new();
    for t in transactions {
        let row = grouped.entry(t.ticker.as_str()).or_default();
        match t.transaction_type {
            TransactionType::Buy => {
                row.buy_shares += t.quantity;
                row.buy_total += t.total;
            }
            TransactionType::Sell => {
                row.sell_shares += t.quantity;
                row.sell_total += t.total.abs();
            }
        }
    }

    grouped
        .into_iter()
        .map(|(ticker, row)| TransactionSummaryRow {
            ticker: ticker.to_string(),
            buy_avg_price: round_display(ratio_or_zero(row.buy_total, row.buy_shares.into())),
            buy_total: round_display(row.buy_total),
            sell_avg_price: round_display(ratio_or_zero(row.sell_total, row.sell_shares.into())),
            sell_total: round_display(row.sell_total),
            net_shares: row.buy_shares as i64 - row.sell_shares as i64,
            ..row
        })
        .collect()
}
