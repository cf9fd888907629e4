use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::ValidationError;
use crate::portfolio::holdings::calculate_share_balances;
use crate::settings::JournalSettings;

/// Net shares per ticker, the only holdings state validation needs.
pub type ShareBalances = BTreeMap<String, i64>;

/// A row of a batch that was not committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedTransaction {
    /// Position in the submitted batch, 0-based
    pub index: usize,
    pub ticker: String,
    pub reason: String,
}

/// Outcome of validating a batch against a running holdings snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchValidation {
    /// Accepted rows in submission order, sequence numbers not yet assigned
    pub accepted: Vec<Transaction>,
    pub rejected: Vec<RejectedTransaction>,
}

/// Validates a proposed transaction against the current share balances.
///
/// A sell is rejected, never clamped, when the ticker is not held or holds
/// fewer shares than requested.
pub fn validate_transaction(
    new: &NewTransaction,
    balances: &ShareBalances,
    settings: &JournalSettings,
) -> Result<Transaction, ValidationError> {
    let transaction = Transaction::from_new(new, 0, settings)?;
    check_holdings(&transaction, balances)?;
    Ok(transaction)
}

/// The holdings half of [`validate_transaction`], for a row already built.
pub fn check_holdings(
    transaction: &Transaction,
    balances: &ShareBalances,
) -> Result<(), ValidationError> {
    if !transaction.is_sell() {
        return Ok(());
    }
    let owned = balances.get(&transaction.ticker).copied().unwrap_or(0);
    if owned <= 0 {
        return Err(ValidationError::NoPosition {
            ticker: transaction.ticker.clone(),
        });
    }
    let requested = transaction.signed_quantity().abs();
    if owned < requested {
        return Err(ValidationError::InsufficientShares {
            ticker: transaction.ticker.clone(),
            requested,
            owned,
        });
    }
    Ok(())
}

/// Batch rows after their intrinsic checks, ready to be validated against
/// a ledger. Building one needs no access to the ledger.
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    rows: Vec<(String, Result<Transaction, ValidationError>)>,
}

impl PreparedBatch {
    pub fn new(proposed: &[NewTransaction], settings: &JournalSettings) -> Self {
        let rows = proposed
            .iter()
            .map(|new| (new.normalized_ticker(), Transaction::from_new(new, 0, settings)))
            .collect();
        Self { rows }
    }

    /// Applies the rows in order: a row may sell shares bought earlier in
    /// the same batch. Rejected rows do not move the running balances.
    pub fn validate(self, ledger: &[Transaction]) -> BatchValidation {
        let initial = (calculate_share_balances(ledger), BatchValidation::default());
        let (_, result) = self.rows.into_iter().enumerate().fold(
            initial,
            |(mut balances, mut result), (index, (ticker, built))| {
                let checked = built.and_then(|transaction| {
                    check_holdings(&transaction, &balances).map(|_| transaction)
                });
                match checked {
                    Ok(transaction) => {
                        *balances.entry(transaction.ticker.clone()).or_insert(0) +=
                            transaction.signed_quantity();
                        result.accepted.push(transaction);
                    }
                    Err(e) => {
                        warn!("Rejected transaction {} ({}): {}", index, ticker, e);
                        result.rejected.push(RejectedTransaction {
                            index,
                            ticker,
                            reason: e.to_string(),
                        });
                    }
                }
                (balances, result)
            },
        );
        result
    }
}

/// Validates a batch as if each row were applied in order against `ledger`.
pub fn validate_batch(
    proposed: &[NewTransaction],
    ledger: &[Transaction],
    settings: &JournalSettings,
) -> BatchValidation {
    PreparedBatch::new(proposed, settings).validate(ledger)
}
