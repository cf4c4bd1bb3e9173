//! Persisted current-index storage
//!
//! The current playlist index is the only state that survives a reload.

use crate::error::{StoreError, StoreResult};
use std::sync::{Arc, Mutex};

/// Storage slot for the current playlist index
///
/// Callers treat every failure as "no stored index".
pub trait IndexStore {
    /// Read the stored index (`Ok(None)` when nothing was stored)
    fn load_index(&self) -> StoreResult<Option<i64>>;

    /// Overwrite the stored index
    fn save_index(&mut self, index: usize) -> StoreResult<()>;
}

/// Parse an index stored as text
///
/// Leading and trailing whitespace is ignored.
pub fn parse_stored_index(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// In-memory index store
///
/// Clones share the same slot, so a test can keep a handle after moving the
/// store into the controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndexStore {
    slot: Arc<Mutex<Option<i64>>>,
}

impl MemoryIndexStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `index`
    pub fn with_index(index: i64) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(index))),
        }
    }

    /// Currently stored value
    pub fn get(&self) -> Option<i64> {
        self.slot.lock().ok().and_then(|slot| *slot)
    }
}

impl IndexStore for MemoryIndexStore {
    fn load_index(&self) -> StoreResult<Option<i64>> {
        self.slot
            .lock()
            .map(|slot| *slot)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn save_index(&mut self, index: usize) -> StoreResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        *slot = Some(index as i64);
        Ok(())
    }
}
