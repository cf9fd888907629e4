//! Ledger builders shared by unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::settings::JournalSettings;
use crate::transactions::{NewTransaction, Transaction, TransactionType};

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub(crate) fn buy(day: &str, ticker: &str, price: Decimal, quantity: i64) -> NewTransaction {
    NewTransaction::new(date(day), ticker, TransactionType::Buy, price, quantity)
        .with_rates(Decimal::ZERO, Decimal::ZERO)
}

pub(crate) fn sell(day: &str, ticker: &str, price: Decimal, quantity: i64) -> NewTransaction {
    NewTransaction::new(date(day), ticker, TransactionType::Sell, price, quantity)
        .with_rates(Decimal::ZERO, Decimal::ZERO)
}

/// Builds ledger rows in insertion order without holdings validation.
pub(crate) fn ledger_of(rows: Vec<NewTransaction>) -> Vec<Transaction> {
    let settings = JournalSettings::default();
    rows.iter()
        .enumerate()
        .map(|(i, new)| Transaction::from_new(new, i as u64, &settings).unwrap())
        .collect()
}
