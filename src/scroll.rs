//! Scroll position capture and restore.
//!
//! Exactly one surface is tracked per page: the designated scroll container
//! when the page has one, otherwise the window. The offset is written to
//! session storage after scrolling settles and read back once on load.

use crate::debounce::Debouncer;
use crate::dom::DomPatch;
use crate::storage::{Scope, Storage, keys, parse_int_prefix};

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// The element whose scroll offset is tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollSurface {
    Container,
    Window,
}

impl ScrollSurface {
    /// Container wins whenever one exists.
    #[must_use]
    pub fn select(container_present: bool) -> Self {
        if container_present { Self::Container } else { Self::Window }
    }

    /// Session storage key for this surface.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Container => keys::CONTAINER_SCROLL_Y,
            Self::Window => keys::WINDOW_SCROLL_Y,
        }
    }
}

pub struct ScrollTracker {
    surface: ScrollSurface,
    pending: Debouncer<i64>,
}

impl ScrollTracker {
    #[must_use]
    pub fn new(surface: ScrollSurface, debounce_ms: u64) -> Self {
        Self { surface, pending: Debouncer::new(debounce_ms) }
    }

    #[must_use]
    pub fn surface(&self) -> ScrollSurface {
        self.surface
    }

    /// Scroll patch for the saved offset, if there is one worth applying.
    ///
    /// An empty or `"0"` value counts as never scrolled.
    #[must_use]
    pub fn restore(&self, storage: &Storage) -> Option<DomPatch> {
        let key = self.surface.storage_key();
        let saved = storage.get(Scope::Session, key);
        log::debug!("scroll: retrieved {key} = {saved:?}");
        let raw = saved.filter(|v| !v.is_empty() && v != "0")?;
        let offset = parse_int_prefix(&raw)?;
        log::debug!("scroll: restoring {key} = {offset}");
        Some(DomPatch::ScrollTo { surface: self.surface, offset })
    }

    /// Record a scroll event; the write happens once scrolling settles.
    pub fn on_scroll(&mut self, now_ms: u64, offset: i64) {
        self.pending.call(now_ms, offset);
    }

    /// When the next flush is due, if a write is pending.
    #[must_use]
    pub fn next_flush_at(&self) -> Option<u64> {
        self.pending.pending_deadline()
    }

    /// Persist the latest offset if the quiet period has elapsed.
    pub fn flush_due(&mut self, now_ms: u64, storage: &Storage) -> Option<i64> {
        let offset = self.pending.take_due(now_ms)?;
        let key = self.surface.storage_key();
        storage.set(Scope::Session, key, &offset.to_string());
        log::debug!("scroll: saved {key} = {offset}");
        Some(offset)
    }

    /// Drop a pending write without persisting it.
    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}
