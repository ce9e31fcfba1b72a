//! In-memory store for tests and embedders without a file system.

use super::{check_keys, BookStore, RecordMap, StoreResult};
use std::cell::{Cell, RefCell};

/// Store that keeps the last saved snapshot in memory.
///
/// Counts `save` calls so callers can assert persistence happened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<RecordMap>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `records`, as if saved earlier.
    pub fn with_records(records: RecordMap) -> StoreResult<Self> {
        check_keys(&records)?;
        Ok(Self {
            snapshot: RefCell::new(Some(records)),
            saves: Cell::new(0),
        })
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Copy of the last saved snapshot.
    pub fn snapshot(&self) -> Option<RecordMap> {
        self.snapshot.borrow().clone()
    }
}

impl BookStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<RecordMap>> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, records: &RecordMap) -> StoreResult<()> {
        *self.snapshot.borrow_mut() = Some(records.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
