//! Persistence layer
//!
//! A small key-value gateway with a file-backed implementation, the wire
//! codec for the ledger and the dark-mode preference, and the debounced
//! autosaver. The gateway is injected explicitly wherever persistence is
//! needed; there is no ambient global handle.

pub mod autosave;
pub mod ledger_io;

pub use autosave::Autosaver;

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{BudgetError, BudgetResult};

/// Persisted key for the serialized ledger (wire contract)
pub const LEDGER_KEY: &str = "transacciones";

/// Persisted key for the dark-mode preference
pub const DARK_MODE_KEY: &str = "modoOscuro";

/// Key-value gateway the core persists through.
///
/// Every operation is independently fallible; callers decide whether a
/// failure matters (a failed save is logged and ignored, a failed load
/// falls back to defaults).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> BudgetResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> BudgetResult<()>;
    fn delete(&self, key: &str) -> BudgetResult<()>;
}

/// File-backed store: one file per key under the data directory.
///
/// Writes go to a temp file in the same directory first and are renamed
/// into place, so a crash can't leave a torn file behind.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> BudgetResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            BudgetError::Io(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BudgetResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(|e| {
            BudgetError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    fn set(&self, key: &str, value: &str) -> BudgetResult<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path)
            .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;
        file.write_all(value.as_bytes())
            .map_err(|e| BudgetError::Storage(format!("Failed to write data: {}", e)))?;
        file.sync_all()
            .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            BudgetError::Storage(format!("Failed to rename temp file: {}", e))
        })
    }

    fn delete(&self, key: &str) -> BudgetResult<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| {
            BudgetError::Storage(format!("Failed to delete {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory store for unit tests; records every write.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use super::KeyValueStore;
    use crate::error::{BudgetError, BudgetResult};

    #[derive(Default)]
    pub struct MemoryStore {
        data: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<(String, String)>>,
        fail_writes: AtomicBool,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, key: &str, value: &str) {
            self.data
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        pub fn contains(&self, key: &str) -> bool {
            self.data.lock().unwrap().contains_key(key)
        }

        /// All `set` calls made so far, in order
        pub fn writes(&self) -> Vec<(String, String)> {
            self.writes.lock().unwrap().clone()
        }

        /// Make every subsequent `set` fail
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> BudgetResult<Option<String>> {
            Ok(self.data.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> BudgetResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(BudgetError::Storage("simulated write failure".into()));
            }
            self.insert(key, value);
            self.writes
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string()));
            Ok(())
        }

        fn delete(&self, key: &str) -> BudgetResult<()> {
            self.data.lock().unwrap().remove(key);
            Ok(())
        }
    }
}
