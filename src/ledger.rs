//! The transaction ledger
//!
//! An ordered collection of transactions, insertion order preserved: add
//! appends, remove filters, update replaces in place. The ledger owns id
//! assignment and all mutation; derived views (totals, breakdowns) only
//! read it. Every operation is a synchronous in-memory transformation;
//! persistence is a side effect layered on top by the session.

use crate::models::transaction::{Transaction, TransactionId, Update};

/// Ordered sequence of transactions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-loaded sequence (used by the persistence layer)
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Look up a transaction by id
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Append a new transaction with default field values and return its id
    pub fn add(&mut self) -> TransactionId {
        let txn = Transaction::new();
        let id = txn.id;
        self.transactions.push(txn);
        id
    }

    /// Apply a single-field edit to the matching transaction.
    ///
    /// An unknown id is a no-op, not an error: the row may have been deleted
    /// while the edit was in flight.
    pub fn update(&mut self, id: TransactionId, update: Update) {
        if let Some(txn) = self.transactions.iter_mut().find(|t| t.id == id) {
            txn.apply(update);
        }
    }

    /// Remove the matching transaction; no-op if the id is unknown
    pub fn remove(&mut self, id: TransactionId) {
        self.transactions.retain(|t| t.id != id);
    }

    /// Drop every transaction
    pub fn clear(&mut self) {
        self.transactions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::TransactionType;

    #[test]
    fn test_add_appends_with_unique_ids() {
        let mut ledger = Ledger::new();
        let a = ledger.add();
        let b = ledger.add();
        let c = ledger.add();

        assert_eq!(ledger.len(), 3);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert_eq!(ledger.transactions()[0].id, a);
        assert_eq!(ledger.transactions()[2].id, c);
    }

    #[test]
    fn test_update_targets_only_one_transaction() {
        let mut ledger = Ledger::new();
        let a = ledger.add();
        let b = ledger.add();

        ledger.update(a, Update::Amount("50".into()));

        assert_eq!(ledger.get(a).unwrap().amount, 50.0);
        assert_eq!(ledger.get(b).unwrap().amount, 0.0);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add();
        let before = ledger.clone();

        ledger.update(TransactionId::generate(), Update::Amount("99".into()));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_remove() {
        let mut ledger = Ledger::new();
        let a = ledger.add();
        let b = ledger.add();

        ledger.remove(a);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get(a).is_none());
        assert!(ledger.get(b).is_some());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add();
        let before = ledger.clone();

        ledger.remove(TransactionId::generate());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_order_stable_across_edits() {
        let mut ledger = Ledger::new();
        let a = ledger.add();
        let b = ledger.add();
        let c = ledger.add();

        ledger.update(b, Update::Kind(TransactionType::Income));
        ledger.remove(a);

        let ids: Vec<_> = ledger.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b, c]);
    }

    #[test]
    fn test_clear() {
        let mut ledger = Ledger::new();
        ledger.add();
        ledger.add();

        ledger.clear();
        assert!(ledger.is_empty());
    }
}
