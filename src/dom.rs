//! DOM patches: the engine's only output channel to the page.
//!
//! Components keep explicit state and return `DomPatch`es describing how the
//! document should change to match it. The browser binding applies them;
//! tests assert on them directly.

use crate::scroll::ScrollSurface;

/// A single requested DOM mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomPatch {
    /// Set the checked state of a checkbox-backed toggle.
    SetChecked { id: String, checked: bool },
    /// Set the `open` attribute of a disclosure (`<details>`) element.
    SetOpen { id: String, open: bool },
    /// Enable or disable a control.
    SetDisabled { id: String, disabled: bool },
    /// Replace an element's text content.
    SetText { id: String, text: String },
    /// Show (`display: block`) or hide (`display: none`) an element.
    SetVisible { id: String, visible: bool },
    /// Clear every text input and textarea inside an element.
    ClearInputs { id: String },
    /// Set the pixel height of an element.
    SetHeight { id: String, px: i32 },
    /// Set the value of a form field.
    SetValue { id: String, value: String },
    /// Scroll the tracked surface to `offset`.
    ScrollTo { surface: ScrollSurface, offset: i64 },
    /// Apply a theme to the embedded editor.
    SetEditorTheme { theme: String },
    /// Submit a form after `delay_ms`.
    SubmitForm { id: String, delay_ms: u32 },
}

impl DomPatch {
    /// Id of the element this patch targets, when it targets one.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::SetChecked { id, .. }
            | Self::SetOpen { id, .. }
            | Self::SetDisabled { id, .. }
            | Self::SetText { id, .. }
            | Self::SetVisible { id, .. }
            | Self::ClearInputs { id }
            | Self::SetHeight { id, .. }
            | Self::SetValue { id, .. }
            | Self::SubmitForm { id, .. } => Some(id),
            Self::ScrollTo { .. } | Self::SetEditorTheme { .. } => None,
        }
    }
}
