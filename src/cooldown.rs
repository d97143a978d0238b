//! Timestamp-based cooldown for the refresh action.
//!
//! SYSTEM CONTEXT
//! ==============
//! The course page has a "refresh" form that hits a rate-limited upstream.
//! After each submission the button stays disabled for a fixed window and a
//! countdown is shown. The only stored state is the last submission time, so
//! the lock survives reloads.
//!
//! TRADE-OFFS
//! ==========
//! The timestamp is written when the user submits, not when the server
//! answers, so a failed submission still consumes the window. A missing or
//! malformed timestamp reads as 0 and the throttle fails open. A timestamp
//! ahead of the clock counts as "just now", so the lock never outlasts one
//! window.
//!
//! The button is not disabled from inside the `submit` handler: a disabled
//! submitter is left out of the form data. The host renders the lock on the
//! next tick instead.

use crate::dom::DomPatch;
use crate::storage::{Scope, Storage};

#[cfg(test)]
#[path = "cooldown_test.rs"]
mod cooldown_test;

/// Ids of the three elements the throttle drives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CooldownElements {
    pub button_id: String,
    pub message_id: String,
    pub form_id: String,
}

/// What the throttle wants the page to show right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CooldownView {
    /// Whole seconds left, or `None` when the action is available.
    pub remaining_secs: Option<i64>,
    pub message: String,
}

impl CooldownView {
    #[must_use]
    pub fn disabled(&self) -> bool {
        self.remaining_secs.is_some()
    }
}

pub struct CooldownThrottle {
    duration_secs: i64,
    key: String,
    elements: CooldownElements,
}

impl CooldownThrottle {
    /// Build the throttle, or `None` when any element is missing; the
    /// feature is then inert.
    #[must_use]
    pub fn attach(duration_secs: i64, key: impl Into<String>, elements: Option<CooldownElements>) -> Option<Self> {
        let Some(elements) = elements else {
            log::debug!("cooldown: elements not found, throttle disabled");
            return None;
        };
        Some(Self { duration_secs, key: key.into(), elements })
    }

    /// Derive the current state from the stored timestamp.
    #[must_use]
    pub fn evaluate(&self, now_ms: u64, storage: &Storage) -> CooldownView {
        let last_ms = storage.read_int(Scope::Durable, &self.key).unwrap_or(0);
        let now_ms = i64::try_from(now_ms).unwrap_or(i64::MAX);
        let elapsed_secs = now_ms.saturating_sub(last_ms).max(0).div_euclid(1000);
        let remaining = self.duration_secs.saturating_sub(elapsed_secs);

        if remaining > 0 {
            CooldownView {
                remaining_secs: Some(remaining),
                message: format!("Try again in {}", format_countdown(remaining)),
            }
        } else {
            CooldownView { remaining_secs: None, message: String::new() }
        }
    }

    /// Render the current state. Runs at init and once per second.
    #[must_use]
    pub fn tick(&self, now_ms: u64, storage: &Storage) -> Vec<DomPatch> {
        let view = self.evaluate(now_ms, storage);
        vec![
            DomPatch::SetDisabled { id: self.elements.button_id.clone(), disabled: view.disabled() },
            DomPatch::SetText { id: self.elements.message_id.clone(), text: view.message },
        ]
    }

    /// Record a submission at `now_ms`, before the request leaves the page.
    /// The following [`tick`](Self::tick) renders the lock.
    pub fn on_submit(&self, now_ms: u64, storage: &Storage) {
        storage.set(Scope::Durable, &self.key, &now_ms.to_string());
        log::debug!("cooldown: submission recorded at {now_ms}");
    }
}

/// `"{minutes}m {seconds}s"`, e.g. `"0m 20s"`.
#[must_use]
pub fn format_countdown(remaining_secs: i64) -> String {
    format!("{}m {}s", remaining_secs / 60, remaining_secs % 60)
}
