//! Glue between the embedded code editor and the page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The code editor is an external widget. This module only needs two things
//! from it: its current text when the code form is submitted, and a way to
//! switch its colour theme when the page theme (`data-theme` on `<html>`)
//! changes.

use crate::config::UiConfig;
use crate::dom::DomPatch;

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

pub const EDITOR_THEME_DARK: &str = "vs-dark";
pub const EDITOR_THEME_LIGHT: &str = "vs";

/// The subset of the editor widget this crate talks to.
pub trait EditorHandle {
    /// Current editor contents.
    fn value(&self) -> String;
    fn set_theme(&self, theme: &str);
}

/// Editor theme for a page theme. Unknown or missing themes get the dark one.
#[must_use]
pub fn editor_theme(data_theme: Option<&str>, config: &UiConfig) -> &'static str {
    let Some(theme) = data_theme else {
        return EDITOR_THEME_DARK;
    };
    if config.dark_themes.iter().any(|t| t == theme) {
        EDITOR_THEME_DARK
    } else if config.light_themes.iter().any(|t| t == theme) {
        EDITOR_THEME_LIGHT
    } else {
        EDITOR_THEME_DARK
    }
}

/// Copies editor contents into the code form before it is submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitBridge {
    form_id: String,
    input_id: String,
    delay_ms: u32,
}

impl SubmitBridge {
    /// `None` when the form or hidden input is missing.
    #[must_use]
    pub fn attach(form_id: Option<String>, input_id: Option<String>, delay_ms: u32) -> Option<Self> {
        match (form_id, input_id) {
            (Some(form_id), Some(input_id)) => Some(Self { form_id, input_id, delay_ms }),
            _ => {
                log::debug!("editor: code form or input not found");
                None
            }
        }
    }

    /// The host has cancelled the native submit; fill the hidden field and
    /// resubmit shortly after.
    #[must_use]
    pub fn on_submit(&self, editor: &dyn EditorHandle) -> Vec<DomPatch> {
        let code = editor.value();
        log::debug!("editor: submitting {} bytes of code", code.len());
        vec![
            DomPatch::SetValue { id: self.input_id.clone(), value: code },
            DomPatch::SubmitForm { id: self.form_id.clone(), delay_ms: self.delay_ms },
        ]
    }
}

/// Patch re-theming the editor after a `data-theme` change.
#[must_use]
pub fn on_theme_change(data_theme: Option<&str>, config: &UiConfig) -> DomPatch {
    DomPatch::SetEditorTheme { theme: editor_theme(data_theme, config).to_owned() }
}
