//! `localStorage` / `sessionStorage` backends.

use crate::error::StorageError;
use crate::storage::{Scope, StorageBackend};

/// A web storage area, or nothing when the browser refuses access.
pub struct WebStorageBackend {
    scope: Scope,
    area: Option<web_sys::Storage>,
}

impl WebStorageBackend {
    #[must_use]
    pub fn open(scope: Scope) -> Self {
        let area = web_sys::window().and_then(|w| {
            let area = match scope {
                Scope::Durable => w.local_storage(),
                Scope::Session => w.session_storage(),
            };
            area.ok().flatten()
        });
        if area.is_none() {
            log::debug!("{scope} storage unavailable");
        }
        Self { scope, area }
    }

    fn area(&self) -> Result<&web_sys::Storage, StorageError> {
        self.area.as_ref().ok_or(StorageError::Unavailable(self.scope))
    }
}

impl StorageBackend for WebStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.area()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable(self.scope))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.area()?
            .set_item(key, value)
            .map_err(|_| StorageError::WriteRejected { scope: self.scope, key: key.to_owned() })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.area()?
            .remove_item(key)
            .map_err(|_| StorageError::Unavailable(self.scope))
    }
}
