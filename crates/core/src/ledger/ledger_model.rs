use crate::transactions::Transaction;

/// Append-only, insertion-ordered collection of transactions.
///
/// Each appended row receives the next `sequence` number, which is the
/// tiebreak for rows sharing a date during chronological replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_sequence: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from rows in insertion order, renumbering their sequences.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut ledger = Self::new();
        ledger.append_all(transactions);
        ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Appends one row, assigning its sequence number. Returns the stored row.
    pub fn append(&mut self, mut transaction: Transaction) -> &Transaction {
        transaction.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.transactions.push(transaction);
        &self.transactions[self.transactions.len() - 1]
    }

    /// Appends rows in order, assigning consecutive sequence numbers.
    pub fn append_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions.reserve(transactions.len());
        for transaction in transactions {
            self.append(transaction);
        }
    }

    /// Drops every row. Sequence numbers keep increasing.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// Cloned rows, safe to compute on without holding any lock.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }
}

/// Rows sorted by date, ties kept in sequence order and then in slice order.
pub fn sort_chronologically(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| (t.date, t.sequence));
    ordered
}
