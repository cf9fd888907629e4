use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::performance_model::PerformancePoint;
use crate::ledger::sort_chronologically;
use crate::portfolio::holdings::{calculate_positions, PositionState};
use crate::transactions::Transaction;
use crate::utils::decimal_utils::round_display;

/// Portfolio value after each distinct ledger date, ascending.
///
/// Keeps one running state per ticker and emits a point whenever the date
/// changes, in a single pass over the sorted ledger. The result equals
/// [`replay_performance`], which re-values the sub-ledger for every date.
pub fn calculate_historical_performance(transactions: &[Transaction]) -> Vec<PerformancePoint> {
    debug!(
        "Reconstructing performance over {} transactions",
        transactions.len()
    );

    let ordered = sort_chronologically(transactions);
    let mut positions: BTreeMap<&str, PositionState> = BTreeMap::new();
    let mut series: Vec<PerformancePoint> = Vec::new();

    for (i, transaction) in ordered.iter().enumerate() {
        positions
            .entry(transaction.ticker.as_str())
            .or_default()
            .apply(transaction);

        let closes_date = ordered
            .get(i + 1)
            .map_or(true, |next| next.date != transaction.date);
        if closes_date {
            series.push(PerformancePoint {
                date: transaction.date,
                portfolio_value: round_display(open_market_value(positions.values())),
            });
        }
    }

    series
}

/// Reference definition: for every distinct date `d`, the value of the
/// holdings computed from all rows dated on or before `d`. O(dates x rows).
pub fn replay_performance(transactions: &[Transaction]) -> Vec<PerformancePoint> {
    let mut dates: Vec<NaiveDate> = transactions.iter().map(|t| t.date).collect();
    dates.sort_unstable();
    dates.dedup();

    dates
        .into_iter()
        .map(|date| {
            let prefix: Vec<Transaction> = transactions
                .iter()
                .filter(|t| t.date <= date)
                .cloned()
                .collect();
            let value: Decimal = calculate_positions(&prefix)
                .iter()
                .map(|h| h.current_value)
                .sum();
            PerformancePoint {
                date,
                portfolio_value: round_display(value),
            }
        })
        .collect()
}

fn open_market_value<'a>(states: impl Iterator<Item = &'a PositionState>) -> Decimal {
    states
        .filter(|state| state.is_open())
        .map(PositionState::market_value)
        .sum()
}
