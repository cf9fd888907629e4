use rust_decimal::Decimal;

use super::allocation_model::TickerAllocation;
use crate::portfolio::holdings::calculate_positions;
use crate::transactions::Transaction;
use crate::utils::decimal_utils::{percentage_of, round_display};

/// Weight of every open holding in the portfolio, largest first.
///
/// Weights are zero when the portfolio has no value.
pub fn calculate_allocation(transactions: &[Transaction]) -> Vec<TickerAllocation> {
    let holdings = calculate_positions(transactions);
    let total_value: Decimal = holdings.iter().map(|h| h.current_value).sum();

    let mut allocations: Vec<(TickerAllocation, Decimal)> = holdings
        .into_iter()
        .map(|h| {
            let weight = percentage_of(h.current_value, total_value);
            let allocation = TickerAllocation {
                ticker: h.ticker,
                value: round_display(h.current_value),
                weight_pct: round_display(weight),
            };
            (allocation, weight)
        })
        .collect();

    allocations.sort_by(|(a, a_weight), (b, b_weight)| {
        b_weight.cmp(a_weight).then_with(|| a.ticker.cmp(&b.ticker))
    });
    allocations.into_iter().map(|(a, _)| a).collect()
}
