use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::ledger_model::Ledger;
use crate::errors::{Error, Result};
use crate::portfolio::holdings::calculate_share_balances;
use crate::settings::JournalSettings;
use crate::transactions::{
    check_holdings, export_transactions_csv, parse_import, parse_restore, NewTransaction,
    PreparedBatch, RejectedTransaction, Transaction,
};

/// How a restored backup is combined with the current ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Restored rows are added after the existing ones
    #[default]
    Append,
    /// The ledger is replaced and sequence numbers restart
    Replace,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportMode::Append => "append",
            ImportMode::Replace => "replace",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Committed and rejected rows of a batch submission or bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Stored rows, with their assigned sequence numbers
    pub accepted: Vec<Transaction>,
    pub rejected: Vec<RejectedTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResult {
    pub mode: ImportMode,
    pub restored: usize,
    pub total: usize,
}

pub trait LedgerServiceTrait: Send + Sync {
    fn settings(&self) -> &JournalSettings;

    /// Cloned rows in insertion order.
    fn snapshot(&self) -> Result<Vec<Transaction>>;

    /// Validates one transaction against current holdings and appends it.
    fn add_transaction(&self, new: NewTransaction) -> Result<Transaction>;

    /// Validates a batch sequentially and commits the accepted rows together.
    fn add_transactions(&self, proposed: Vec<NewTransaction>) -> Result<BatchResult>;

    /// Bulk import of a user CSV file.
    fn import_csv(&self, content: &[u8]) -> Result<BatchResult>;

    /// Restores an exported ledger without holdings validation.
    fn restore_csv(&self, content: &[u8], mode: ImportMode) -> Result<RestoreResult>;

    fn export_csv(&self) -> Result<String>;

    /// Removes every row. Returns the number removed.
    fn clear(&self) -> Result<usize>;
}

/// Shared ledger store.
///
/// Readers take a snapshot and compute without holding the lock. Writers
/// build their rows first, then check holdings and append under one write
/// lock, so appends are serialized and a batch commits as a single group.
#[derive(Clone)]
pub struct LedgerService {
    ledger: Arc<RwLock<Ledger>>,
    settings: JournalSettings,
}

impl LedgerService {
    pub fn new(settings: JournalSettings) -> Self {
        Self::with_ledger(Ledger::new(), settings)
    }

    pub fn with_ledger(ledger: Ledger, settings: JournalSettings) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            settings,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger>> {
        self.ledger
            .read()
            .map_err(|e| Error::Unexpected(format!("Ledger lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger>> {
        self.ledger
            .write()
            .map_err(|e| Error::Unexpected(format!("Ledger lock poisoned: {}", e)))
    }

    /// Validates `proposed` against the locked ledger and appends what passes.
    fn commit_batch(&self, proposed: &[NewTransaction]) -> Result<BatchResult> {
        let prepared = PreparedBatch::new(proposed, &self.settings);
        let mut ledger = self.write()?;
        let validation = prepared.validate(ledger.transactions());

        let accepted_count = validation.accepted.len();
        ledger.append_all(validation.accepted);
        let accepted = ledger.transactions()[ledger.len() - accepted_count..].to_vec();

        info!(
            "Committed {} of {} transactions ({} rejected)",
            accepted_count,
            proposed.len(),
            validation.rejected.len()
        );
        Ok(BatchResult {
            accepted,
            rejected: validation.rejected,
        })
    }
}

impl LedgerServiceTrait for LedgerService {
    fn settings(&self) -> &JournalSettings {
        &self.settings
    }

    fn snapshot(&self) -> Result<Vec<Transaction>> {
        Ok(self.read()?.snapshot())
    }

    fn add_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction::from_new(&new, 0, &self.settings)?;
        let mut ledger = self.write()?;
        let balances = calculate_share_balances(ledger.transactions());
        check_holdings(&transaction, &balances)?;
        let stored = ledger.append(transaction).clone();
        info!(
            "Recorded {} {} x{} @ {}",
            stored.transaction_type, stored.ticker, stored.quantity, stored.price
        );
        Ok(stored)
    }

    fn add_transactions(&self, proposed: Vec<NewTransaction>) -> Result<BatchResult> {
        debug!("Submitting batch of {} transactions", proposed.len());
        self.commit_batch(&proposed)
    }

    fn import_csv(&self, content: &[u8]) -> Result<BatchResult> {
        let proposed = parse_import(content, &self.settings)?;
        debug!("Importing {} rows", proposed.len());
        self.commit_batch(&proposed)
    }

    fn restore_csv(&self, content: &[u8], mode: ImportMode) -> Result<RestoreResult> {
        let restored = parse_restore(content, &self.settings)?;
        let count = restored.len();

        let mut ledger = self.write()?;
        match mode {
            ImportMode::Replace => *ledger = Ledger::from_transactions(restored),
            ImportMode::Append => ledger.append_all(restored),
        }
        info!(
            "Restored {} transactions ({}), ledger now has {}",
            count,
            mode,
            ledger.len()
        );
        Ok(RestoreResult {
            mode,
            restored: count,
            total: ledger.len(),
        })
    }

    fn export_csv(&self) -> Result<String> {
        let transactions = self.snapshot()?;
        export_transactions_csv(&transactions)
    }

    fn clear(&self) -> Result<usize> {
        let mut ledger = self.write()?;
        let removed = ledger.len();
        ledger.clear();
        info!("Cleared {} transactions", removed);
        Ok(removed)
    }
}
