//! Browser binding for [`PageCore`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled only with the `hydrate` feature. [`WebPage::init`] discovers the
//! page under a root element, restores persisted state, then attaches every
//! listener, timer and observer it needs. All of them are owned by the
//! returned handle and released by [`WebPage::teardown`], so several
//! instances can coexist without leaking global listeners.
//!
//! TRADE-OFFS
//! ==========
//! Listener closures borrow the shared core only for the duration of one
//! `handle` call and apply patches after the borrow is released. Patches that
//! make the browser fire further events (`<details>` toggles) are delivered
//! as later tasks and never re-enter a live borrow.

pub mod discover;
pub mod dom;
pub mod storage;
pub mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Element, Event, EventTarget, HtmlDetailsElement, HtmlInputElement, KeyboardEvent, MutationObserver, MutationObserverInit};

use crate::clock::SystemClock;
use crate::config::{CONFIG_ELEMENT_ID, UiConfig};
use crate::error::UiError;
use crate::forms;
use crate::page::{PageCore, UiEvent};
use crate::storage::{Scope, Storage};

use self::discover::discover;
use self::dom::{Dom, JsEditor, scroll_offset, set_editor, with_editor};
use self::storage::WebStorageBackend;
use self::timer::{DebouncedFn, debounce};

type SharedCore = Rc<RefCell<PageCore>>;

/// An event listener that detaches itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, f: impl FnMut(Event) + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        match target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self { target: target.clone(), event, callback }),
            Err(err) => {
                log::warn!("could not attach `{event}` listener: {err:?}");
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::debug!("could not detach `{}` listener: {err:?}", self.event);
        }
    }
}

/// Live behavior layer for one page root.
pub struct WebPage {
    core: SharedCore,
    dom: Dom,
    listeners: Vec<Listener>,
    cooldown_tick: Option<Interval>,
    scroll_flush: Option<Rc<DebouncedFn<()>>>,
    theme_observer: Option<(MutationObserver, Closure<dyn FnMut(js_sys::Array, MutationObserver)>)>,
}

impl WebPage {
    /// Restore state and wire every behavior under `root`.
    ///
    /// Fails only outside a browser document.
    pub fn init(root: &Element) -> Result<Self, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::MissingElement("window".into()))?;
        let document = window.document().ok_or_else(|| UiError::MissingElement("document".into()))?;
        let config = read_config(&document);
        let found = discover(&document, root, &config);

        let storage = Storage::new(
            Box::new(WebStorageBackend::open(Scope::Durable)),
            Box::new(WebStorageBackend::open(Scope::Session)),
        );
        let init = PageCore::init(found.snapshot, storage, Box::new(SystemClock), config);
        let dom = Dom::new(window.clone(), document.clone(), found.scroll_container.clone());
        dom.apply(&init.patches);

        let mut page = Self {
            core: Rc::new(RefCell::new(init.core)),
            dom,
            listeners: Vec::new(),
            cooldown_tick: None,
            scroll_flush: None,
            theme_observer: None,
        };

        for details in found.accordions {
            page.listen_accordion(details);
        }
        for checkbox in found.checkboxes {
            page.listen_checkbox(checkbox);
        }
        match &found.scroll_container {
            Some(container) => page.listen_scroll(container.clone().into()),
            None => page.listen_scroll(window.clone().into()),
        }
        if let Some(form) = &found.cooldown_form {
            page.listen_cooldown(form.clone().into());
        }
        if let Some(form) = &found.code_form {
            page.listen_code_submit(form.clone().into());
        }
        page.listen_chrome(&document);
        page.observe_theme(&document);

        log::debug!("course-ui: page initialised");
        Ok(page)
    }

    /// Detach every listener, stop every timer and silence the core.
    pub fn teardown(self) {
        self.core.borrow_mut().teardown();
        self.dom.cancel_timers();
        if let Some(flush) = &self.scroll_flush {
            flush.cancel();
        }
        if let Some((observer, _)) = &self.theme_observer {
            observer.disconnect();
        }
        // Listeners, interval and observer callback detach on drop.
    }

    fn push(&mut self, listener: Option<Listener>) {
        self.listeners.extend(listener);
    }

    /// Forward one event to the core and apply the resulting patches.
    fn dispatch(core: &SharedCore, dom: &Dom, event: UiEvent) {
        let patches = core.borrow_mut().handle(event);
        dom.apply(&patches);
    }

    fn listen_accordion(&mut self, details: HtmlDetailsElement) {
        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        let target: EventTarget = details.clone().into();
        self.push(Listener::attach(&target, "toggle", move |_| {
            let event = UiEvent::AccordionToggled { id: details.id(), open: details.open() };
            Self::dispatch(&core, &dom, event);
        }));
    }

    fn listen_checkbox(&mut self, checkbox: HtmlInputElement) {
        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        let target: EventTarget = checkbox.clone().into();
        self.push(Listener::attach(&target, "change", move |_| {
            let event = UiEvent::CheckboxChanged { id: checkbox.id(), checked: checkbox.checked() };
            Self::dispatch(&core, &dom, event);
        }));
    }

    fn listen_scroll(&mut self, target: EventTarget) {
        let wait_ms = self.core.borrow().config().scroll_debounce_ms;
        let core = Rc::clone(&self.core);
        let flush = Rc::new(debounce(wait_ms, move |()| {
            if let Some(offset) = core.borrow_mut().flush_scroll_pending() {
                log::debug!("scroll: saved offset {offset}");
            }
        }));
        self.scroll_flush = Some(Rc::clone(&flush));

        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        let container = target.dyn_ref::<Element>().cloned();
        self.push(Listener::attach(&target, "scroll", move |_| {
            let offset = scroll_offset(dom.window(), container.as_ref());
            Self::dispatch(&core, &dom, UiEvent::Scrolled { offset });
            flush.call(());
        }));
    }

    fn listen_cooldown(&mut self, form: EventTarget) {
        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        let relock: RefCell<Option<Timeout>> = RefCell::new(None);
        self.push(Listener::attach(&form, "submit", move |_| {
            Self::dispatch(&core, &dom, UiEvent::CooldownSubmitted);
            // Render the lock once the submitter is already in the form data.
            let (core, dom) = (Rc::clone(&core), dom.clone());
            *relock.borrow_mut() = Some(Timeout::new(0, move || {
                let patches = core.borrow().tick_cooldown();
                dom.apply(&patches);
            }));
        }));

        let tick_ms = self.core.borrow().config().cooldown_tick_ms;
        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        self.cooldown_tick = Some(Interval::new(tick_ms, move || {
            let patches = core.borrow().tick_cooldown();
            dom.apply(&patches);
        }));
    }

    fn listen_code_submit(&mut self, form: EventTarget) {
        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        self.push(Listener::attach(&form, "submit", move |ev: Event| {
            // Without an editor the native submission goes ahead untouched.
            let Some(patches) = with_editor(|editor| core.borrow().submit_code(editor)).filter(|p| !p.is_empty())
            else {
                return;
            };
            ev.prevent_default();
            dom.apply(&patches);
        }));
    }

    fn listen_chrome(&mut self, document: &web_sys::Document) {
        let target: EventTarget = document.clone().into();

        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        self.push(Listener::attach(&target, "keydown", move |ev: Event| {
            let Some(key) = ev.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            let modal_id = core.borrow().config().modal_toggle_id.clone();
            let modal_open = dom
                .document()
                .get_element_by_id(&modal_id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .is_some_and(|input| input.checked());
            Self::dispatch(&core, &dom, UiEvent::KeyDown { key, modal_open });
        }));

        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        self.push(Listener::attach(&target, "input", move |ev: Event| {
            if let Some(area) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok()) {
                resize_textarea(&core, &dom, &area);
            }
        }));

        let Some(body) = document.body() else {
            return;
        };
        let body: EventTarget = body.into();

        let core = Rc::clone(&self.core);
        self.push(Listener::attach(&body, "htmx:configRequest", move |ev: Event| {
            let selector = core.borrow().config().csrf_input_selector.clone();
            add_csrf_header(&ev, &selector);
        }));

        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        self.push(Listener::attach(&body, "htmx:afterSwap", move |ev: Event| {
            let modal_body = core.borrow().config().modal_body_id.clone();
            let Some(swapped) = swap_target(&ev).filter(|el| el.id() == modal_body) else {
                return;
            };
            let (core, frame_dom) = (Rc::clone(&core), dom.clone());
            let frame = Closure::once_into_js(move || {
                for area in discover::select_all(&swapped, "textarea") {
                    if let Ok(area) = area.dyn_into::<web_sys::HtmlTextAreaElement>() {
                        resize_textarea(&core, &frame_dom, &area);
                    }
                }
            });
            if let Err(err) = dom.window().request_animation_frame(frame.unchecked_ref()) {
                log::debug!("could not schedule textarea resize: {err:?}");
            }
        }));
    }

    fn observe_theme(&mut self, document: &web_sys::Document) {
        let Some(root) = document.document_element() else {
            return;
        };
        let (core, dom) = (Rc::clone(&self.core), self.dom.clone());
        let observed = root.clone();
        let callback = Closure::wrap(Box::new(move |_records: js_sys::Array, _observer: MutationObserver| {
            let data_theme = observed.get_attribute("data-theme");
            Self::dispatch(&core, &dom, UiEvent::ThemeChanged { data_theme });
        }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

        let Ok(observer) = MutationObserver::new(callback.as_ref().unchecked_ref()) else {
            log::debug!("theme observer unavailable");
            return;
        };
        let options = MutationObserverInit::new();
        options.set_attributes(true);
        options.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("data-theme")));
        if let Err(err) = observer.observe_with_options(&root, &options) {
            log::debug!("theme observer failed to start: {err:?}");
            return;
        }
        self.theme_observer = Some((observer, callback));
    }
}

fn resize_textarea(core: &SharedCore, dom: &Dom, area: &web_sys::HtmlTextAreaElement) {
    let style = area.style();
    if let Err(err) = style.set_property("height", "0px") {
        log::debug!("textarea reset failed: {err:?}");
        return;
    }
    let id = area.id();
    if id.is_empty() {
        // Nothing a patch could address; size it in place.
        let px = area.scroll_height().max(0);
        if let Err(err) = style.set_property("height", &format!("{px}px")) {
            log::debug!("textarea resize failed: {err:?}");
        }
        return;
    }
    WebPage::dispatch(core, dom, UiEvent::TextareaInput { id, scroll_height: area.scroll_height() });
}

fn swap_target(ev: &Event) -> Option<Element> {
    let custom = ev.dyn_ref::<web_sys::CustomEvent>()?;
    let target = js_sys::Reflect::get(&custom.detail(), &JsValue::from_str("target")).ok()?;
    target.dyn_into::<Element>().ok()
}

fn add_csrf_header(ev: &Event, token_selector: &str) {
    let token = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(token_selector).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value());
    let Some((name, value)) = forms::csrf_header(token.as_deref()) else {
        return;
    };
    let Some(custom) = ev.dyn_ref::<web_sys::CustomEvent>() else {
        return;
    };
    let headers = js_sys::Reflect::get(&custom.detail(), &JsValue::from_str("headers"));
    let Ok(headers) = headers else {
        return;
    };
    if let Err(err) = js_sys::Reflect::set(&headers, &JsValue::from_str(name), &JsValue::from_str(&value)) {
        log::debug!("could not set csrf header: {err:?}");
    }
}

fn read_config(document: &web_sys::Document) -> UiConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    UiConfig::from_json_or_default(raw.as_deref())
}

// =============================================================================
// JS ENTRY POINTS
// =============================================================================

thread_local! {
    static PAGE: RefCell<Option<WebPage>> = const { RefCell::new(None) };
}

/// Install logging and wire the whole document. Call on `DOMContentLoaded`.
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Err(err) = console_log::init_with_level(read_config(&document).log_level()) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already set: {err}")));
    }
    let Some(root) = document.document_element() else {
        return;
    };
    let page = match WebPage::init(&root) {
        Ok(page) => Some(page),
        Err(err) => {
            log::warn!("course-ui: {err}");
            None
        }
    };
    PAGE.with(|slot| {
        if let Some(previous) = slot.borrow_mut().take() {
            previous.teardown();
        }
        *slot.borrow_mut() = page;
    });
}

/// Undo [`start`].
#[wasm_bindgen]
pub fn teardown() {
    PAGE.with(|slot| {
        if let Some(page) = slot.borrow_mut().take() {
            page.teardown();
        }
    });
}

/// Hand the page the editor instance once it is ready. The editor is
/// themed to match the page straight away.
#[wasm_bindgen]
pub fn register_editor(editor: JsValue) {
    set_editor(Some(JsEditor::new(editor)));
    PAGE.with(|slot| {
        let slot = slot.borrow();
        let Some(page) = slot.as_ref() else {
            log::debug!("editor registered before start");
            return;
        };
        let data_theme = page
            .dom
            .document()
            .document_element()
            .and_then(|root| root.get_attribute("data-theme"));
        WebPage::dispatch(&page.core, &page.dom, UiEvent::EditorRegistered { data_theme });
    });
}

/// Inline handler for "add …" buttons: fold the form open or shut.
#[wasm_bindgen]
pub fn toggle_form(id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(el) = window.document().and_then(|d| d.get_element_by_id(id)) else {
        return;
    };
    let hidden = window
        .get_computed_style(&el)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("display").ok())
        .is_some_and(|display| display == "none");
    let patches = forms::toggle_form(id, hidden);
    let applied = PAGE.with(|slot| slot.borrow().as_ref().map(|page| page.dom.apply(&patches)));
    if applied.is_none() {
        if let Some(document) = window.document() {
            Dom::new(window, document, None).apply(&patches);
        }
    }
}
