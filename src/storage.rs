//! Persistence adapter over the browser's two storage scopes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every feature that remembers UI state across page loads goes through
//! [`Storage`]. It centralizes the "storage may be missing or broken" policy
//! so callers only ever see `Option<String>` and fire-and-forget writes.
//!
//! TRADE-OFFS
//! ==========
//! Failures are logged at `debug` and swallowed. A page with storage disabled
//! behaves exactly like a first visit, which is the desired degradation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::StorageError;

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// Exact key names. Existing deployments already hold values under these.
pub mod keys {
    /// Durable: id of the last open unit accordion.
    pub const LAST_OPEN_UNIT: &str = "lastOpenUnit";
    /// Durable: id of the last open topic accordion.
    pub const LAST_OPEN_TOPIC: &str = "lastOpenTopic";
    /// Session: scroll offset of the designated scroll container.
    pub const CONTAINER_SCROLL_Y: &str = "containerScrollY";
    /// Session: scroll offset of the window.
    pub const WINDOW_SCROLL_Y: &str = "windowScrollY";
    /// Durable: epoch milliseconds of the last refresh submission.
    pub const REFRESH_TIMESTAMP: &str = "dmoj-refresh-timestamp";
}

/// Persistence scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Survives browser restart (`localStorage`).
    Durable,
    /// Survives reload but not restart (`sessionStorage`).
    Session,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Durable => f.write_str("durable"),
            Self::Session => f.write_str("session"),
        }
    }
}

/// A single key/value store for one scope.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend. Clones share the same map, so a clone handed to a
/// fresh [`Storage`] sees what the previous "page load" wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored items, for assertions.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items.borrow().clone()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Backend whose every operation fails, modelling disabled storage.
#[derive(Clone, Copy, Debug)]
pub struct UnavailableBackend(pub Scope);

impl StorageBackend for UnavailableBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable(self.0))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(self.0))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(self.0))
    }
}

/// Uniform get/set/remove over the durable and session scopes.
pub struct Storage {
    durable: Box<dyn StorageBackend>,
    session: Box<dyn StorageBackend>,
}

impl Storage {
    #[must_use]
    pub fn new(durable: Box<dyn StorageBackend>, session: Box<dyn StorageBackend>) -> Self {
        Self { durable, session }
    }

    /// Both scopes backed by fresh in-memory maps.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()), Box::new(MemoryBackend::new()))
    }

    /// Both scopes refuse every operation.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(
            Box::new(UnavailableBackend(Scope::Durable)),
            Box::new(UnavailableBackend(Scope::Session)),
        )
    }

    fn backend(&self, scope: Scope) -> &dyn StorageBackend {
        match scope {
            Scope::Durable => self.durable.as_ref(),
            Scope::Session => self.session.as_ref(),
        }
    }

    /// Read `key`; `None` when absent or when storage is unusable.
    #[must_use]
    pub fn get(&self, scope: Scope, key: &str) -> Option<String> {
        match self.backend(scope).get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("storage get `{key}` failed: {err}");
                None
            }
        }
    }

    pub fn set(&self, scope: Scope, key: &str, value: &str) {
        if let Err(err) = self.backend(scope).set_item(key, value) {
            log::debug!("storage set `{key}` failed: {err}");
        }
    }

    pub fn remove(&self, scope: Scope, key: &str) {
        if let Err(err) = self.backend(scope).remove_item(key) {
            log::debug!("storage remove `{key}` failed: {err}");
        }
    }

    /// Read `key` as an integer with `parseInt` leniency.
    #[must_use]
    pub fn read_int(&self, scope: Scope, key: &str) -> Option<i64> {
        self.get(scope, key).as_deref().and_then(parse_int_prefix)
    }
}

/// Parse the leading decimal integer of `raw`, ignoring surrounding
/// whitespace and any trailing garbage (`"250.5px"` → 250).
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
