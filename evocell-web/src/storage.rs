//! localStorage-backed implementation of the engine's storage seam.

use evocell_game::constants::PROGRESS_STORAGE_KEY;
use evocell_game::{ProgressRecord, ProgressStorage};
use thiserror::Error;

use crate::dom;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("write to localStorage failed: {0}")]
    WriteFailed(String),
    #[error("progress serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persists the progress record under [`PROGRESS_STORAGE_KEY`]. A corrupt
/// stored payload is treated as missing, never as a fatal error.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl ProgressStorage for BrowserStorage {
    type Error = StorageError;

    fn load(&self) -> Result<Option<ProgressRecord>, Self::Error> {
        let storage = dom::local_storage()
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))?;
        let Ok(Some(raw)) = storage.get_item(PROGRESS_STORAGE_KEY) else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                log::warn!("stored progress was unreadable, starting fresh: {err}");
                Ok(None)
            }
        }
    }

    fn save(&self, record: &ProgressRecord) -> Result<(), Self::Error> {
        let storage = dom::local_storage()
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))?;
        let payload = serde_json::to_string(record)?;
        storage
            .set_item(PROGRESS_STORAGE_KEY, &payload)
            .map_err(|err| StorageError::WriteFailed(dom::js_error_message(&err)))
    }

    fn clear(&self) -> Result<(), Self::Error> {
        let storage = dom::local_storage()
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))?;
        storage
            .remove_item(PROGRESS_STORAGE_KEY)
            .map_err(|err| StorageError::WriteFailed(dom::js_error_message(&err)))
    }
}
