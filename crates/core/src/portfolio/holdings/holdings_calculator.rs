use std::collections::BTreeMap;

use log::{debug, warn};

use super::holdings_model::{Holding, PositionState};
use crate::ledger::sort_chronologically;
use crate::transactions::Transaction;

/// Replays the ledger in (date, sequence) order and returns the running
/// state of every ticker that appears in it, keyed by ticker.
///
/// Input order does not matter: the last price of a ticker is the price of
/// its chronologically last row, ties broken by insertion order.
pub fn replay_positions(transactions: &[Transaction]) -> BTreeMap<String, PositionState> {
    let mut positions: BTreeMap<String, PositionState> = BTreeMap::new();
    for transaction in sort_chronologically(transactions) {
        positions
            .entry(transaction.ticker.clone())
            .or_default()
            .apply(transaction);
    }
    positions
}

/// Net share count per ticker, including closed and short positions.
pub fn calculate_share_balances(transactions: &[Transaction]) -> BTreeMap<String, i64> {
    let mut balances: BTreeMap<String, i64> = BTreeMap::new();
    for transaction in transactions {
        *balances.entry(transaction.ticker.clone()).or_insert(0) +=
            transaction.signed_quantity();
    }
    balances
}

/// Open positions at full precision, ordered by ticker.
pub fn calculate_positions(transactions: &[Transaction]) -> Vec<Holding> {
    let positions = replay_positions(transactions);
    holdings_from_states(&positions)
}

pub(crate) fn holdings_from_states(positions: &BTreeMap<String, PositionState>) -> Vec<Holding> {
    positions
        .iter()
        .filter_map(|(ticker, state)| {
            if state.is_open() && state.bought_shares == 0 {
                warn!(
                    "{} has {} net shares but no recorded buys; cost basis is zero",
                    ticker, state.shares
                );
            }
            Holding::from_state(ticker, state)
        })
        .collect()
}

/// Current holdings, rounded for display.
///
/// Tickers whose net position is zero or negative are left out.
pub fn get_current_holdings(transactions: &[Transaction]) -> Vec<Holding> {
    debug!("Calculating holdings for {} transactions", transactions.len());
    calculate_positions(transactions)
        .iter()
        .map(Holding::rounded)
        .collect()
}
