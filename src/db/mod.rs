// Wasm path persists to localStorage; the native build (tests included)
// keeps the blob in memory.
#[cfg(target_arch = "wasm32")]
pub mod wasm_store;

use crate::store::StoreError;

/// Single named blob of serialized schedule data.
pub trait BlobStore {
    fn read(&self) -> Option<String>;
    fn write(&self, blob: &str) -> Result<(), StoreError>;
}

/// In-memory backend. Clones share the same cell, so a second
/// `ScheduleStore::load` over a clone observes earlier writes.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Default)]
pub struct MemoryStore {
    cell: std::rc::Rc<std::cell::RefCell<Option<String>>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BlobStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.cell.borrow().clone()
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        *self.cell.borrow_mut() = Some(blob.to_string());
        Ok(())
    }
}
