//! Apply [`DomPatch`]es to the live document.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDetailsElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, Window};

use crate::dom::DomPatch;
use crate::editor::EditorHandle;
use crate::scroll::ScrollSurface;

use super::discover::select_all;

/// An editor object handed over by the page. It must expose `getValue()`
/// and `setTheme(name)`.
pub struct JsEditor(JsValue);

impl JsEditor {
    #[must_use]
    pub fn new(handle: JsValue) -> Self {
        Self(handle)
    }

    fn call(&self, method: &str, args: &js_sys::Array) -> Option<JsValue> {
        let func = js_sys::Reflect::get(&self.0, &JsValue::from_str(method))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        func.apply(&self.0, args).ok()
    }
}

impl EditorHandle for JsEditor {
    fn value(&self) -> String {
        self.call("getValue", &js_sys::Array::new())
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    }

    fn set_theme(&self, theme: &str) {
        if self.call("setTheme", &js_sys::Array::of1(&JsValue::from_str(theme))).is_none() {
            log::debug!("editor: setTheme unavailable");
        }
    }
}

thread_local! {
    static EDITOR: RefCell<Option<JsEditor>> = const { RefCell::new(None) };
}

pub fn set_editor(editor: Option<JsEditor>) {
    EDITOR.with(|slot| *slot.borrow_mut() = editor);
}

/// Run `f` against the registered editor, if any.
pub fn with_editor<R>(f: impl FnOnce(&JsEditor) -> R) -> Option<R> {
    EDITOR.with(|slot| slot.borrow().as_ref().map(f))
}

/// Handles the patch applier needs beyond the document itself.
#[derive(Clone)]
pub struct Dom {
    window: Window,
    document: Document,
    container: Option<Element>,
    submit_timer: Rc<RefCell<Option<Timeout>>>,
}

impl Dom {
    #[must_use]
    pub fn new(window: Window, document: Document, container: Option<Element>) -> Self {
        Self { window, document, container, submit_timer: Rc::new(RefCell::new(None)) }
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Drop a pending deferred submit.
    pub fn cancel_timers(&self) {
        self.submit_timer.borrow_mut().take();
    }

    pub fn apply(&self, patches: &[DomPatch]) {
        for patch in patches {
            if let Err(err) = self.apply_one(patch) {
                log::debug!("dom: could not apply {patch:?}: {err:?}");
            }
        }
    }

    fn element(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("#{id} not found")))
    }

    fn html(&self, id: &str) -> Result<HtmlElement, JsValue> {
        self.element(id)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
    }

    fn apply_one(&self, patch: &DomPatch) -> Result<(), JsValue> {
        match patch {
            DomPatch::SetChecked { id, checked } => {
                self.element(id)?
                    .dyn_into::<HtmlInputElement>()?
                    .set_checked(*checked);
            }
            DomPatch::SetOpen { id, open } => {
                self.element(id)?
                    .dyn_into::<HtmlDetailsElement>()?
                    .set_open(*open);
            }
            DomPatch::SetDisabled { id, disabled } => {
                self.element(id)?.toggle_attribute_with_force("disabled", *disabled)?;
            }
            DomPatch::SetText { id, text } => {
                self.element(id)?.set_text_content(Some(text));
            }
            DomPatch::SetVisible { id, visible } => {
                let display = if *visible { "block" } else { "none" };
                self.html(id)?.style().set_property("display", display)?;
            }
            DomPatch::ClearInputs { id } => {
                for field in select_all(&self.element(id)?, r#"input[type="text"], textarea"#) {
                    clear_field(field);
                }
            }
            DomPatch::SetHeight { id, px } => {
                self.html(id)?.style().set_property("height", &format!("{px}px"))?;
            }
            DomPatch::SetValue { id, value } => {
                self.element(id)?
                    .dyn_into::<HtmlInputElement>()?
                    .set_value(value);
            }
            DomPatch::ScrollTo { surface, offset } => self.scroll_to(*surface, *offset),
            DomPatch::SetEditorTheme { theme } => {
                if with_editor(|editor| editor.set_theme(theme)).is_none() {
                    log::debug!("editor: no editor registered for theme change");
                }
            }
            DomPatch::SubmitForm { id, delay_ms } => {
                let form = self.element(id)?.dyn_into::<HtmlFormElement>()?;
                let timer = Timeout::new(*delay_ms, move || {
                    if let Err(err) = form.submit() {
                        log::warn!("code form submit failed: {err:?}");
                    }
                });
                *self.submit_timer.borrow_mut() = Some(timer);
            }
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn scroll_to(&self, surface: ScrollSurface, offset: i64) {
        match (surface, &self.container) {
            (ScrollSurface::Container, Some(container)) => {
                let top = i32::try_from(offset).unwrap_or(i32::MAX);
                container.set_scroll_top(top);
            }
            _ => self.window.scroll_to_with_x_and_y(0.0, offset as f64),
        }
    }
}

fn clear_field(field: Element) {
    match field.dyn_into::<HtmlInputElement>() {
        Ok(input) => input.set_value(""),
        Err(field) => {
            if let Ok(area) = field.dyn_into::<HtmlTextAreaElement>() {
                area.set_value("");
            }
        }
    }
}

/// Current scroll offset of `container`, or of the window.
#[allow(clippy::cast_possible_truncation)]
pub fn scroll_offset(window: &Window, container: Option<&Element>) -> i64 {
    match container {
        Some(el) => i64::from(el.scroll_top()),
        None => window.scroll_y().map_or(0, |y| y as i64),
    }
}
