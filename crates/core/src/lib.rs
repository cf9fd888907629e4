//! Stock Journal Core - Portfolio accounting over a ledger of trades.
//!
//! Turns an append-only ledger of buy/sell transactions into holdings,
//! portfolio totals, a historical value series and a profit/loss report.
//! All calculators are pure functions over a ledger snapshot; the
//! [`ledger::LedgerService`] is the only shared mutable state.

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod portfolio;
pub mod settings;
pub mod transactions;
pub mod utils;

#[cfg(test)]
mod test_fixtures;

// Re-export common types from the ledger and portfolio modules
pub use ledger::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
