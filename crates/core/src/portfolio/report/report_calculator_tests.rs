#[cfg(test)]
mod tests {
    use crate::portfolio::report::generate_profit_loss_report;
    use crate::test_fixtures::{buy, ledger_of, sell};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_realized_and_unrealized_split() {
        let ledger = ledger_of(vec![
            buy("2024-01-02", "AAPL", dec!(150), 10),
            sell("2024-01-10", "AAPL", dec!(155), 3),
        ]);

        let report = generate_profit_loss_report(&ledger);
        assert_eq!(report.len(), 1);
        let row = &report[0];
        assert_eq!(row.ticker, "AAPL");
        assert_eq!(row.buy_cost, dec!(1500));
        assert_eq!(row.sell_revenue, dec!(465));
        assert_eq!(row.cost_basis_sold, dec!(450));
        assert_eq!(row.realized_profit_loss, dec!(15));
        assert_eq!(row.unrealized_profit_loss, dec!(35));
        assert_eq!(row.total_profit_loss, dec!(50));
    }

    #[test]
    fn test_fully_exited_ticker_is_reported() {
        let ledger = ledger_of(vec![
            buy("2024-01-02", "MSFT", dec!(300), 5),
            sell("2024-02-02", "MSFT", dec!(320), 5),
        ]);

        let report = generate_profit_loss_report(&ledger);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].realized_profit_loss, dec!(100));
        assert_eq!(report[0].unrealized_profit_loss, Decimal::ZERO);
        assert_eq!(report[0].total_profit_loss, dec!(100));
    }

    #[test]
    fn test_sorted_by_total_descending() {
        let ledger = ledger_of(vec![
            buy("2024-01-02", "LOSS", dec!(100), 1),
            sell("2024-01-03", "LOSS", dec!(50), 1),
            buy("2024-01-02", "WIN", dec!(100), 1),
            sell("2024-01-03", "WIN", dec!(200), 1),
            buy("2024-01-02", "FLAT", dec!(100), 1),
        ]);

        let tickers: Vec<_> = generate_profit_loss_report(&ledger)
            .into_iter()
            .map(|r| r.ticker)
            .collect();
        assert_eq!(tickers, vec!["WIN", "FLAT", "LOSS"]);
    }

    #[test]
    fn test_ties_are_ordered_by_ticker() {
        let ledger = ledger_of(vec![
            buy("2024-01-02", "ZZZ", dec!(10), 1),
            buy("2024-01-02", "AAA", dec!(10), 1),
        ]);

        let tickers: Vec<_> = generate_profit_loss_report(&ledger)
            .into_iter()
            .map(|r| r.ticker)
            .collect();
        assert_eq!(tickers, vec!["AAA", "ZZZ"]);
    }

    #[test]
    fn test_sell_without_buys_has_zero_cost_basis() {
        let ledger = ledger_of(vec![sell("2024-01-02", "GME", dec!(20), 2)]);

        let report = generate_profit_loss_report(&ledger);
        assert_eq!(report[0].cost_basis_sold, Decimal::ZERO);
        assert_eq!(report[0].realized_profit_loss, dec!(40));
        assert_eq!(report[0].unrealized_profit_loss, Decimal::ZERO);
    }

    #[test]
    fn test_empty_ledger_gives_empty_report() {
        assert!(generate_profit_loss_report(&[]).is_empty());
    }
}
