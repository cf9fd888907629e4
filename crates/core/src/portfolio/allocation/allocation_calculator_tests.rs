#[cfg(test)]
mod tests {
    use crate::portfolio::allocation::calculate_allocation;
    use crate::test_fixtures::{buy, ledger_of, sell};
    use rust_decimal_macros::dec;

    #[test]
    fn test_weights_sum_to_hundred() {
        let ledger = ledger_of(vec![
            buy("2024-01-02", "AAPL", dec!(100), 3),
            buy("2024-01-02", "MSFT", dec!(100), 1),
        ]);

        let allocation = calculate_allocation(&ledger);
        assert_eq!(allocation.len(), 2);
        assert_eq!(allocation[0].ticker, "AAPL");
        assert_eq!(allocation[0].value, dec!(300));
        assert_eq!(allocation[0].weight_pct, dec!(75));
        assert_eq!(allocation[1].ticker, "MSFT");
        assert_eq!(allocation[1].weight_pct, dec!(25));
    }

    #[test]
    fn test_closed_positions_are_left_out() {
        let ledger = ledger_of(vec![
            buy("2024-01-02", "AAPL", dec!(100), 3),
            sell("2024-01-03", "AAPL", dec!(110), 3),
            buy("2024-01-02", "MSFT", dec!(100), 1),
        ]);

        let allocation = calculate_allocation(&ledger);
        assert_eq!(allocation.len(), 1);
        assert_eq!(allocation[0].weight_pct, dec!(100));
    }

    #[test]
    fn test_empty_ledger() {
        assert!(calculate_allocation(&[]).is_empty());
    }
}
