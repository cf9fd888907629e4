use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::{Transaction, TransactionType};
use crate::utils::decimal_utils::{percentage_of, ratio_or_zero, round_display};

/// Running state of one ticker while the ledger is replayed in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionState {
    /// Net shares: bought minus sold
    pub shares: i64,
    pub bought_shares: u64,
    /// Sum of Buy totals
    pub buy_total: Decimal,
    pub sold_shares: u64,
    /// Sum of |Sell totals|
    pub sell_revenue: Decimal,
    /// Price of the chronologically last row seen
    pub last_price: Decimal,
}

impl PositionState {
    pub fn apply(&mut self, transaction: &Transaction) {
        self.shares += transaction.signed_quantity();
        match transaction.transaction_type {
            TransactionType::Buy => {
                self.bought_shares += transaction.quantity;
                self.buy_total += transaction.total;
            }
            TransactionType::Sell => {
                self.sold_shares += transaction.quantity;
                self.sell_revenue += transaction.total.abs();
            }
        }
        self.last_price = transaction.price;
    }

    /// Only positions with a positive net share count are holdings.
    pub fn is_open(&self) -> bool {
        self.shares > 0
    }

    /// Weighted average price of Buy fills; sells do not move it.
    pub fn average_cost(&self) -> Decimal {
        ratio_or_zero(self.buy_total, Decimal::from(self.bought_shares))
    }

    pub fn market_value(&self) -> Decimal {
        Decimal::from(self.shares) * self.last_price
    }
}

/// A current position in one ticker.
///
/// Produced with full precision by [`super::calculate_positions`] and
/// rounded for output by [`super::get_current_holdings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub shares: u64,
    pub average_cost: Decimal,
    pub total_cost: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub return_pct: Decimal,
}

impl Holding {
    /// Values the open position at its last traded price.
    pub fn from_state(ticker: &str, state: &PositionState) -> Option<Self> {
        if !state.is_open() {
            return None;
        }
        let shares = state.shares.unsigned_abs();
        let average_cost = state.average_cost();
        let total_cost = average_cost * Decimal::from(shares);
        let current_value = state.market_value();
        let profit_loss = current_value - total_cost;
        Some(Holding {
            ticker: ticker.to_string(),
            shares,
            average_cost,
            total_cost,
            current_value,
            profit_loss,
            return_pct: percentage_of(profit_loss, total_cost),
        })
    }

    pub fn rounded(&self) -> Self {
        Holding {
            ticker: self.ticker.clone(),
            shares: self.shares,
            average_cost: round_display(self.average_cost),
            total_cost: round_display(self.total_cost),
            current_value: round_display(self.current_value),
            profit_loss: round_display(self.profit_loss),
            return_pct: round_display(self.return_pct),
        }
    }
}
