//! Wire codec for the persisted ledger and the dark-mode preference
//!
//! The ledger is stored under `transacciones` as a bare JSON array of
//! transaction records, the dark-mode preference under `modoOscuro` as a
//! JSON boolean. Loading never fails the caller: gateway errors and
//! malformed payloads fall back to defaults. The one destructive rule is
//! that an unparseable ledger payload gets its key purged, since there is
//! no recovery path for corrupt local data.

use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::ledger::Ledger;
use crate::models::transaction::{Transaction, TransactionId};

use super::{KeyValueStore, DARK_MODE_KEY, LEDGER_KEY};

/// Load the ledger, falling back to empty on any failure.
///
/// A corrupt payload is deleted from the store before returning empty.
/// Records saved before ids existed get one assigned from their position.
pub fn load_ledger(store: &dyn KeyValueStore) -> Ledger {
    let payload = match store.get(LEDGER_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Ledger::new(),
        Err(err) => {
            warn!(%err, "could not read stored ledger; starting empty");
            return Ledger::new();
        }
    };

    match serde_json::from_str::<Vec<Transaction>>(&payload) {
        Ok(mut transactions) => {
            migrate_missing_ids(&mut transactions);
            debug!(count = transactions.len(), "ledger loaded");
            Ledger::from_transactions(transactions)
        }
        Err(err) => {
            warn!(%err, "stored ledger is corrupt; clearing it");
            if let Err(err) = store.delete(LEDGER_KEY) {
                warn!(%err, "could not clear corrupt ledger payload");
            }
            Ledger::new()
        }
    }
}

/// Serialize and write the full transaction list
pub fn save_ledger(store: &dyn KeyValueStore, transactions: &[Transaction]) -> BudgetResult<()> {
    let payload =
        serde_json::to_string(transactions).map_err(|e| BudgetError::Json(e.to_string()))?;
    store.set(LEDGER_KEY, &payload)
}

/// Load the dark-mode preference; any failure falls back to `false` by
/// value, without touching the stored key.
pub fn load_dark_mode(store: &dyn KeyValueStore) -> bool {
    match store.get(DARK_MODE_KEY) {
        Ok(Some(payload)) => serde_json::from_str(&payload).unwrap_or_else(|err| {
            warn!(%err, "stored dark-mode preference is malformed");
            false
        }),
        Ok(None) => false,
        Err(err) => {
            warn!(%err, "could not read dark-mode preference");
            false
        }
    }
}

/// Persist the dark-mode preference (immediate, not debounced)
pub fn save_dark_mode(store: &dyn KeyValueStore, dark: bool) -> BudgetResult<()> {
    store.set(DARK_MODE_KEY, if dark { "true" } else { "false" })
}

fn migrate_missing_ids(transactions: &mut [Transaction]) {
    for (position, txn) in transactions.iter_mut().enumerate() {
        if txn.id.is_unset() {
            txn.id = TransactionId::migrated(position);
        }
    }
}
