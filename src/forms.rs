//! Small form and page-chrome behaviors.
//!
//! Inline "add" forms that fold open and shut, textareas that grow with their
//! content, the Escape shortcut for the modal, and the CSRF header HTMX
//! requests must carry.

use crate::dom::DomPatch;

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Show a hidden form, or hide a visible one and clear its text fields.
#[must_use]
pub fn toggle_form(id: &str, currently_hidden: bool) -> Vec<DomPatch> {
    if currently_hidden {
        vec![DomPatch::SetVisible { id: id.to_owned(), visible: true }]
    } else {
        vec![
            DomPatch::SetVisible { id: id.to_owned(), visible: false },
            DomPatch::ClearInputs { id: id.to_owned() },
        ]
    }
}

/// Grow or shrink a textarea to its content height.
///
/// The host must reset the height to zero before measuring `scroll_height`.
#[must_use]
pub fn auto_resize(id: &str, scroll_height: i32) -> DomPatch {
    DomPatch::SetHeight { id: id.to_owned(), px: scroll_height.max(0) }
}

/// Uncheck the modal toggle when Escape is pressed while it is open.
#[must_use]
pub fn close_modal_on_escape(key: &str, modal_id: &str, modal_open: bool) -> Option<DomPatch> {
    if key != "Escape" || !modal_open {
        return None;
    }
    log::debug!("modal closed via Escape key");
    Some(DomPatch::SetChecked { id: modal_id.to_owned(), checked: false })
}

/// Header to attach to an outgoing HTMX request, when a token is present.
#[must_use]
pub fn csrf_header(token: Option<&str>) -> Option<(&'static str, String)> {
    token
        .filter(|t| !t.is_empty())
        .map(|t| (CSRF_HEADER, t.to_owned()))
}
