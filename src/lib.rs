//! Client-side UI state persistence and throttling for the course pages.
//!
//! The server renders complete HTML; this crate adds the behavior layer on
//! top: exclusive toggles and accordions whose open state survives reloads,
//! scroll position restore, the refresh-button cooldown, and the glue around
//! the embedded code editor. Everything except [`web`] is plain Rust driven
//! by explicit events and a clock, so it is tested without a browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`storage`] | Durable/session key-value adapter that never fails callers |
//! | [`clock`] | Epoch-millisecond time source |
//! | [`debounce`] | Trailing-edge debounce state machine |
//! | [`dom`] | [`dom::DomPatch`], the engine's output to the page |
//! | [`toggle`] | Exclusive toggle groups |
//! | [`accordion`] | Persisted unit/topic accordions |
//! | [`scroll`] | Scroll position capture and restore |
//! | [`cooldown`] | Timestamp-based cooldown of the refresh action |
//! | [`editor`] | Code editor theme sync and submit bridge |
//! | [`forms`] | Form toggle, textarea sizing, modal Escape, CSRF header |
//! | [`config`] | Ids, selectors and durations with JSON overrides |
//! | [`page`] | [`page::PageCore`]: composes everything behind init/teardown |
//! | `web` | Browser binding (`hydrate` feature only) |

pub mod accordion;
pub mod clock;
pub mod config;
pub mod cooldown;
pub mod debounce;
pub mod dom;
pub mod editor;
pub mod error;
pub mod forms;
pub mod page;
pub mod scroll;
pub mod storage;
pub mod toggle;

#[cfg(feature = "hydrate")]
pub mod web;
