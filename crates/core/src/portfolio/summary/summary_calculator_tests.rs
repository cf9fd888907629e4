#[cfg(test)]
mod tests {
    use crate::portfolio::summary::{get_portfolio_summary, PortfolioSummary};
    use crate::test_fixtures::{buy, ledger_of, sell};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_ledger_is_all_zero() {
        let summary = get_portfolio_summary(&[]);
        assert_eq!(summary, PortfolioSummary::default());
        assert_eq!(summary.total_invested, Decimal::ZERO);
        assert_eq!(summary.return_pct, Decimal::ZERO);
        assert_eq!(summary.total_transactions, 0);
    }

    #[test]
    fn test_totals_across_tickers() {
        let ledger = ledger_of(vec![
            buy("2024-01-02", "AAPL", dec!(150), 10),
            sell("2024-01-10", "AAPL", dec!(155), 3),
            buy("2024-01-03", "MSFT", dec!(400), 2),
            buy("2024-01-04", "MSFT", dec!(380), 1),
        ]);

        let summary = get_portfolio_summary(&ledger);
        // AAPL 1050 cost / 1085 value; MSFT 1180 cost / 1140 value
        assert_eq!(summary.total_invested, dec!(2230));
        assert_eq!(summary.current_value, dec!(2225));
        assert_eq!(summary.profit_loss, dec!(-5));
        assert_eq!(summary.return_pct, dec!(-0.22));
        assert_eq!(summary.total_transactions, 4);
        assert_eq!(summary.total_buys, 3);
        assert_eq!(summary.total_sells, 1);
    }

    #[test]
    fn test_counts_include_closed_positions() {
        let ledger = ledger_of(vec![
            buy("2024-01-02", "NFLX", dec!(600), 1),
            sell("2024-01-05", "NFLX", dec!(650), 1),
        ]);

        let summary = get_portfolio_summary(&ledger);
        assert_eq!(summary.total_invested, Decimal::ZERO);
        assert_eq!(summary.current_value, Decimal::ZERO);
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.total_buys, 1);
        assert_eq!(summary.total_sells, 1);
    }

    #[test]
    fn test_totals_round_after_summing() {
        // Each holding's cost is 0.005 before rounding
        let ledger = ledger_of(vec![
            buy("2024-01-02", "AAA", dec!(0.005), 1),
            buy("2024-01-02", "BBB", dec!(0.005), 1),
        ]);

        let summary = get_portfolio_summary(&ledger);
        assert_eq!(summary.total_invested, dec!(0.01));
    }
}
