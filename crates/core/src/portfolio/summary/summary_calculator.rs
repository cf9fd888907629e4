use log::debug;
use rust_decimal::Decimal;

use super::summary_model::PortfolioSummary;
use crate::portfolio::holdings::calculate_positions;
use crate::transactions::Transaction;
use crate::utils::decimal_utils::{percentage_of, round_display};

/// Rolls the open positions into portfolio totals.
///
/// Totals are summed from unrounded holdings and rounded once. An empty
/// ledger gives an all-zero summary.
pub fn get_portfolio_summary(transactions: &[Transaction]) -> PortfolioSummary {
    debug!("Summarizing portfolio over {} transactions", transactions.len());

    let holdings = calculate_positions(transactions);
    let total_invested: Decimal = holdings.iter().map(|h| h.total_cost).sum();
    let current_value: Decimal = holdings.iter().map(|h| h.current_value).sum();
    let profit_loss = current_value - total_invested;

    let total_buys = transactions.iter().filter(|t| t.is_buy()).count();
    let total_sells = transactions.iter().filter(|t| t.is_sell()).count();

    PortfolioSummary {
        total_invested: round_display(total_invested),
        current_value: round_display(current_value),
        profit_loss: round_display(profit_loss),
        return_pct: round_display(percentage_of(profit_loss, total_invested)),
        total_transactions: transactions.len(),
        total_buys,
        total_sells,
    }
}
