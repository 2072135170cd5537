//! Load-gated session tying the ledger to persistence
//!
//! A session can only be obtained through [`Session::load`], so no mutation
//! is ever accepted before the initial load settles. Every ledger mutation
//! schedules a debounced save; the dark-mode preference is written
//! immediately on change. Persistence failures never corrupt in-memory
//! state and never surface to the caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::ledger::Ledger;
use crate::models::transaction::{TransactionId, Update};
use crate::storage::{autosave, ledger_io, Autosaver, KeyValueStore, LEDGER_KEY};

/// Coordinator owning the ledger, the display preference and the autosaver
pub struct Session {
    ledger: Ledger,
    dark_mode: bool,
    store: Arc<dyn KeyValueStore>,
    autosaver: Autosaver,
}

impl Session {
    /// Perform the startup load and return a ready session.
    ///
    /// Corrupt ledger data resets to empty (and purges its key); a
    /// malformed preference just falls back to its default.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_delay(store, autosave::DEBOUNCE_DELAY)
    }

    /// [`Session::load`] with a custom debounce window (tests use a short one)
    pub fn load_with_delay(store: Arc<dyn KeyValueStore>, delay: Duration) -> Self {
        let ledger = ledger_io::load_ledger(store.as_ref());
        let dark_mode = ledger_io::load_dark_mode(store.as_ref());
        let autosaver = Autosaver::new(store.clone(), delay);
        Self {
            ledger,
            dark_mode,
            store,
            autosaver,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Append a new transaction and schedule a save
    pub fn add(&mut self) -> TransactionId {
        let id = self.ledger.add();
        self.schedule_save();
        id
    }

    /// Edit one field of a transaction and schedule a save
    pub fn update(&mut self, id: TransactionId, update: Update) {
        self.ledger.update(id, update);
        self.schedule_save();
    }

    /// Remove a transaction and schedule a save
    pub fn remove(&mut self, id: TransactionId) {
        self.ledger.remove(id);
        self.schedule_save();
    }

    /// Empty the ledger and purge its stored key right away.
    ///
    /// A snapshot still waiting out its debounce window is discarded first;
    /// otherwise it would land after the delete and resurrect the data.
    pub fn clear(&mut self) {
        self.ledger.clear();
        self.autosaver.cancel();
        if let Err(err) = self.store.delete(LEDGER_KEY) {
            warn!(%err, "could not clear stored ledger");
        }
    }

    /// Set and immediately persist the dark-mode preference
    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
        if let Err(err) = ledger_io::save_dark_mode(self.store.as_ref(), dark) {
            warn!(%err, "could not save dark-mode preference");
        }
    }

    /// Write any pending ledger state now instead of waiting out the
    /// debounce window. One-shot CLI commands call this before exiting.
    pub fn flush(&self) {
        self.autosaver.flush();
    }

    fn schedule_save(&self) {
        self.autosaver.schedule(self.ledger.transactions().to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::TransactionType;
    use crate::storage::memory::MemoryStore;
    use crate::storage::DARK_MODE_KEY;

    const TEST_DELAY: Duration = Duration::from_millis(50);

    fn session_with(store: Arc<MemoryStore>) -> Session {
        Session::load_with_delay(store, TEST_DELAY)
    }

    #[test]
    fn test_mutations_persist_after_flush() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session_with(store.clone());

        let id = session.add();
        session.update(id, Update::Kind(TransactionType::Income));
        session.update(id, Update::Amount("1000".into()));
        session.flush();

        let reloaded = session_with(store);
        assert_eq!(reloaded.ledger().len(), 1);
        assert_eq!(reloaded.ledger().get(id).unwrap().amount, 1000.0);
        assert_eq!(
            reloaded.ledger().get(id).unwrap().kind,
            TransactionType::Income
        );
    }

    #[test]
    fn test_rapid_edits_coalesce() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session_with(store.clone());

        let id = session.add();
        session.update(id, Update::Amount("1".into()));
        session.update(id, Update::Amount("2".into()));
        std::thread::sleep(TEST_DELAY * 4);

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].1.contains("2"));
    }

    #[test]
    fn test_corrupt_ledger_resets_on_load() {
        let store = Arc::new(MemoryStore::new());
        store.insert(LEDGER_KEY, "][");

        let session = session_with(store.clone());

        assert!(session.ledger().is_empty());
        assert!(!store.contains(LEDGER_KEY));
    }

    #[test]
    fn test_clear_purges_stored_key() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session_with(store.clone());

        session.add();
        session.flush();
        assert!(store.contains(LEDGER_KEY));

        session.clear();
        assert!(session.ledger().is_empty());
        assert!(!store.contains(LEDGER_KEY));
    }

    #[test]
    fn test_clear_supersedes_pending_save() {
        let store = Arc::new(MemoryStore::new());
        // Window far longer than the test, so the add's snapshot is
        // guaranteed to still be pending when clear runs
        let mut session = Session::load_with_delay(store.clone(), Duration::from_secs(3600));

        session.add();
        session.clear();

        assert!(!store.contains(LEDGER_KEY));
        // The pre-clear snapshot is gone; flushing writes nothing back
        session.flush();
        assert!(!store.contains(LEDGER_KEY));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_dark_mode_saved_immediately() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session_with(store.clone());
        assert!(!session.dark_mode());

        session.set_dark_mode(true);
        assert!(session.dark_mode());
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        let reloaded = session_with(store);
        assert!(reloaded.dark_mode());
    }

    #[test]
    fn test_save_failure_leaves_memory_state_intact() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session_with(store.clone());
        store.fail_writes(true);

        let id = session.add();
        session.set_dark_mode(true);
        session.flush();

        assert_eq!(session.ledger().len(), 1);
        assert!(session.ledger().get(id).is_some());
        assert!(session.dark_mode());
        assert!(store.writes().is_empty());
    }
}
