//! Page controller: composes every behavior behind one init/teardown pair.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`PageCore`] holds all UI state for one page and is driven by
//! [`UiEvent`]s. It never touches the DOM; each call returns the
//! [`DomPatch`]es the host must apply. The browser binding (`web`, feature
//! `hydrate`) discovers the page into a [`PageSnapshot`], forwards events and
//! applies patches. Tests drive it directly.
//!
//! DESIGN
//! ======
//! Init order matters: accordion and scroll state are restored first, then
//! the cooldown renders, and only then does the host attach listeners. The
//! two checkbox groups and the two accordion groups are separate mechanisms
//! with no shared keys.

use crate::accordion::{AccordionRestorer, Restoration, TopicElement, UnitElement};
use crate::clock::Clock;
use crate::config::UiConfig;
use crate::cooldown::{CooldownElements, CooldownThrottle};
use crate::dom::DomPatch;
use crate::editor::{self, EditorHandle, SubmitBridge};
use crate::forms;
use crate::scroll::{ScrollSurface, ScrollTracker};
use crate::storage::Storage;
use crate::toggle::{GroupId, ToggleManager, ToggleWidget};

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

pub const UNIT_TOGGLES: &str = "unit-toggles";
pub const TOPIC_TOGGLES: &str = "topic-toggles";

/// What the host found on the page at load.
#[derive(Clone, Debug, Default)]
pub struct PageSnapshot {
    pub units: Vec<UnitElement>,
    pub topics: Vec<TopicElement>,
    /// `.unit-toggle` checkboxes with their current state.
    pub unit_toggles: Vec<ToggleWidget>,
    /// `.topic-toggle` checkboxes with their current state.
    pub topic_toggles: Vec<ToggleWidget>,
    pub has_scroll_container: bool,
    pub cooldown: Option<CooldownElements>,
    pub code_form_id: Option<String>,
    pub code_input_id: Option<String>,
}

/// A DOM event, already reduced to the data the engine needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// A `.unit-toggle` / `.topic-toggle` checkbox changed.
    CheckboxChanged { id: String, checked: bool },
    /// A `<details>` accordion fired `toggle`.
    AccordionToggled { id: String, open: bool },
    /// The tracked scroll surface moved.
    Scrolled { offset: i64 },
    /// The cooldown form is about to submit. The lock appears on the next
    /// [`PageCore::tick_cooldown`].
    CooldownSubmitted,
    /// A key went down anywhere on the page.
    KeyDown { key: String, modal_open: bool },
    /// `data-theme` on the root element changed.
    ThemeChanged { data_theme: Option<String> },
    /// The page handed over its editor; `data_theme` is the current page theme.
    EditorRegistered { data_theme: Option<String> },
    /// An inline form's toggle button was pressed.
    FormToggleRequested { id: String, currently_hidden: bool },
    /// A textarea changed; `scroll_height` measured after resetting height.
    TextareaInput { id: String, scroll_height: i32 },
}

/// Result of [`PageCore::init`].
pub struct PageInit {
    pub core: PageCore,
    pub patches: Vec<DomPatch>,
    pub restoration: Restoration,
}

pub struct PageCore {
    config: UiConfig,
    storage: Storage,
    clock: Box<dyn Clock>,
    checkboxes: ToggleManager,
    accordion: AccordionRestorer,
    scroll: ScrollTracker,
    cooldown: Option<CooldownThrottle>,
    code_submit: Option<SubmitBridge>,
    active: bool,
}

impl PageCore {
    /// Build the page state and restore everything persisted.
    #[must_use]
    pub fn init(snapshot: PageSnapshot, storage: Storage, clock: Box<dyn Clock>, config: UiConfig) -> PageInit {
        let mut checkboxes = ToggleManager::new();
        checkboxes.register_group(GroupId::new(UNIT_TOGGLES), snapshot.unit_toggles);
        checkboxes.register_group(GroupId::new(TOPIC_TOGGLES), snapshot.topic_toggles);

        let mut accordion = AccordionRestorer::new(snapshot.units, snapshot.topics);
        let restoration = accordion.restore(&storage);
        let mut patches = restoration.patches.clone();

        let surface = ScrollSurface::select(snapshot.has_scroll_container);
        let scroll = ScrollTracker::new(surface, u64::from(config.scroll_debounce_ms));
        patches.extend(scroll.restore(&storage));

        let cooldown = CooldownThrottle::attach(config.cooldown_secs, config.cooldown_key.clone(), snapshot.cooldown);
        if let Some(throttle) = &cooldown {
            patches.extend(throttle.tick(clock.now_ms(), &storage));
        }

        let code_submit = SubmitBridge::attach(snapshot.code_form_id, snapshot.code_input_id, config.submit_delay_ms);

        let core = Self {
            config,
            storage,
            clock,
            checkboxes,
            accordion,
            scroll,
            cooldown,
            code_submit,
            active: true,
        };
        PageInit { core, patches, restoration }
    }

    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn scroll_surface(&self) -> ScrollSurface {
        self.scroll.surface()
    }

    #[must_use]
    pub fn has_cooldown(&self) -> bool {
        self.cooldown.is_some()
    }

    #[must_use]
    pub fn has_code_submit(&self) -> bool {
        self.code_submit.is_some()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn checkboxes(&self) -> &ToggleManager {
        &self.checkboxes
    }

    #[must_use]
    pub fn accordion(&self) -> &AccordionRestorer {
        &self.accordion
    }

    /// Route one event. After teardown every event is ignored.
    pub fn handle(&mut self, event: UiEvent) -> Vec<DomPatch> {
        if !self.active {
            return Vec::new();
        }
        match event {
            UiEvent::CheckboxChanged { id, checked } => self.checkbox_changed(&id, checked),
            UiEvent::AccordionToggled { id, open } => self.accordion.on_toggle(&id, open, &self.storage),
            UiEvent::Scrolled { offset } => {
                self.scroll.on_scroll(self.clock.now_ms(), offset);
                Vec::new()
            }
            UiEvent::CooldownSubmitted => {
                if let Some(throttle) = &self.cooldown {
                    throttle.on_submit(self.clock.now_ms(), &self.storage);
                }
                Vec::new()
            }
            UiEvent::KeyDown { key, modal_open } => {
                forms::close_modal_on_escape(&key, &self.config.modal_toggle_id, modal_open)
                    .into_iter()
                    .collect()
            }
            UiEvent::ThemeChanged { data_theme } | UiEvent::EditorRegistered { data_theme } => {
                vec![editor::on_theme_change(data_theme.as_deref(), &self.config)]
            }
            UiEvent::FormToggleRequested { id, currently_hidden } => forms::toggle_form(&id, currently_hidden),
            UiEvent::TextareaInput { id, scroll_height } => vec![forms::auto_resize(&id, scroll_height)],
        }
    }

    /// Cooldown countdown step; the host calls this every tick interval.
    #[must_use]
    pub fn tick_cooldown(&self) -> Vec<DomPatch> {
        match (&self.cooldown, self.active) {
            (Some(throttle), true) => throttle.tick(self.clock.now_ms(), &self.storage),
            _ => Vec::new(),
        }
    }

    /// Persist a pending scroll offset now; the host's debounce timer has
    /// already waited out the quiet period.
    pub fn flush_scroll_pending(&mut self) -> Option<i64> {
        if !self.active {
            return None;
        }
        let due = self.scroll.next_flush_at()?;
        self.scroll.flush_due(due.max(self.clock.now_ms()), &self.storage)
    }

    /// Milliseconds until the pending scroll write is due.
    #[must_use]
    pub fn scroll_flush_in(&self) -> Option<u64> {
        let due = self.scroll.next_flush_at()?;
        Some(due.saturating_sub(self.clock.now_ms()))
    }

    /// The code form is submitting; the host has cancelled the native submit.
    #[must_use]
    pub fn submit_code(&self, editor: &dyn EditorHandle) -> Vec<DomPatch> {
        match (&self.code_submit, self.active) {
            (Some(bridge), true) => bridge.on_submit(editor),
            _ => Vec::new(),
        }
    }

    /// Stop reacting to events and drop any pending scroll write.
    pub fn teardown(&mut self) {
        self.scroll.cancel();
        self.active = false;
        log::debug!("page: torn down");
    }

    fn checkbox_changed(&mut self, id: &str, checked: bool) -> Vec<DomPatch> {
        let Some(group) = self.checkboxes.group_of(id).cloned() else {
            return Vec::new();
        };
        match self.checkboxes.set_open(&group, id, checked) {
            Ok(patches) => patches,
            Err(err) => {
                log::debug!("page: {err}");
                Vec::new()
            }
        }
    }
}
