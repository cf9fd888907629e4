use log::debug;
use rust_decimal::Decimal;

use super::report_model::ProfitLossRow;
use crate::portfolio::holdings::{replay_positions, Holding};
use crate::transactions::Transaction;
use crate::utils::decimal_utils::round_display;

/// Profit/loss per ticker ever traded, fully exited ones included.
///
/// Realized P/L measures sell revenue against the all-time average buy cost;
/// unrealized P/L is the open holding's profit/loss. Rows are sorted by total
/// profit/loss descending, ties by ticker.
pub fn generate_profit_loss_report(transactions: &[Transaction]) -> Vec<ProfitLossRow> {
    debug!(
        "Generating profit/loss report over {} transactions",
        transactions.len()
    );

    let positions = replay_positions(transactions);
    let mut rows: Vec<(ProfitLossRow, Decimal)> = positions
        .iter()
        .map(|(ticker, state)| {
            let cost_basis_sold = state.average_cost() * Decimal::from(state.sold_shares);
            let realized = state.sell_revenue - cost_basis_sold;
            let unrealized = Holding::from_state(ticker, state)
                .map(|h| h.profit_loss)
                .unwrap_or(Decimal::ZERO);
            let total = realized + unrealized;

            let row = ProfitLossRow {
                ticker: ticker.clone(),
                buy_cost: round_display(state.buy_total),
                sell_revenue: round_display(state.sell_revenue),
                cost_basis_sold: round_display(cost_basis_sold),
                realized_profit_loss: round_display(realized),
                unrealized_profit_loss: round_display(unrealized),
                total_profit_loss: round_display(total),
            };
            (row, total)
        })
        .collect();

    // Sort on the unrounded total so near-ties keep their true order
    rows.sort_by(|(a, a_total), (b, b_total)| {
        b_total.cmp(a_total).then_with(|| a.ticker.cmp(&b.ticker))
    });

    rows.into_iter().map(|(row, _)| row).collect()
}
