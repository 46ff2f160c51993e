use web_sys::{window, Storage};

use crate::db::BlobStore;
use crate::store::StoreError;

/// Key shared with the legacy blob format.
const STORAGE_KEY: &str = "illuminationSchedule";

fn storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

/// localStorage blob under the legacy `illuminationSchedule` key.
#[derive(Clone, Copy, Default)]
pub struct LocalStore;

impl BlobStore for LocalStore {
    fn read(&self) -> Option<String> {
        storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        let storage = storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(STORAGE_KEY, blob)
            .map_err(|err| StoreError::Write(format!("{err:?}")))
    }
}
