//! Unit/topic accordions whose open state survives page loads.
//!
//! SYSTEM CONTEXT
//! ==============
//! Course pages render units as `<details id="unit-*">` and, nested inside
//! them, topics as `<details id="topic-*">`. The last open unit and topic are
//! remembered in durable storage and re-opened on the next load.
//!
//! DESIGN
//! ======
//! Units and topics are two independent exclusive groups in a
//! [`ToggleManager`]. Restoration sets state before listeners exist and never
//! writes storage. A toggle event that reports the state the engine already
//! holds is the echo of restoration or of a forced sibling closure and is
//! ignored, so those never cascade into key removal.

use crate::dom::DomPatch;
use crate::storage::{Scope, Storage, keys};
use crate::toggle::{GroupId, ToggleManager, ToggleWidget, WidgetKind};

#[cfg(test)]
#[path = "accordion_test.rs"]
mod accordion_test;

const UNIT_GROUP: &str = "unit-accordions";
const TOPIC_GROUP: &str = "topic-accordions";

/// A unit accordion element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitElement {
    pub id: String,
}

/// A topic accordion element and the unit it is nested in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicElement {
    pub id: String,
    pub parent_unit_id: String,
}

/// Why a persisted key was not restored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StaleKey {
    /// `lastOpenUnit` names no unit on this page.
    UnknownUnit(String),
    /// `lastOpenTopic` names no topic on this page.
    UnknownTopic(String),
    /// `lastOpenTopic` names a topic outside the restored unit.
    OrphanedTopic { topic: String, parent_unit_id: String },
}

/// Outcome of [`AccordionRestorer::restore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Restoration {
    pub unit: Option<String>,
    pub topic: Option<String>,
    pub patches: Vec<DomPatch>,
    pub stale: Vec<StaleKey>,
}

/// Which accordion level an element belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Unit,
    Topic,
}

pub struct AccordionRestorer {
    toggles: ToggleManager,
    topics: Vec<TopicElement>,
}

impl AccordionRestorer {
    /// Build the restorer with every element closed.
    #[must_use]
    pub fn new(units: Vec<UnitElement>, topics: Vec<TopicElement>) -> Self {
        let mut toggles = ToggleManager::new();
        toggles.register_group(
            GroupId::new(UNIT_GROUP),
            units
                .into_iter()
                .map(|u| ToggleWidget::new(u.id, WidgetKind::Disclosure, false))
                .collect(),
        );
        toggles.register_group(
            GroupId::new(TOPIC_GROUP),
            topics
                .iter()
                .map(|t| ToggleWidget::new(t.id.clone(), WidgetKind::Disclosure, false))
                .collect(),
        );
        Self { toggles, topics }
    }

    #[must_use]
    pub fn open_unit(&self) -> Option<&str> {
        self.toggles.open_member(&GroupId::new(UNIT_GROUP))
    }

    #[must_use]
    pub fn open_topic(&self) -> Option<&str> {
        self.toggles.open_member(&GroupId::new(TOPIC_GROUP))
    }

    /// Whether `id` is one of this page's accordion elements.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.level_of(id).is_some()
    }

    /// Re-open the persisted unit and, within it, the persisted topic.
    pub fn restore(&mut self, storage: &Storage) -> Restoration {
        let mut out = Restoration::default();
        let units = GroupId::new(UNIT_GROUP);
        let topics = GroupId::new(TOPIC_GROUP);

        if let Some(unit_id) = storage.get(Scope::Durable, keys::LAST_OPEN_UNIT) {
            match self.toggles.open(&units, &unit_id) {
                Ok(patches) => {
                    out.patches.extend(patches);
                    out.unit = Some(unit_id);
                }
                Err(_) => out.stale.push(StaleKey::UnknownUnit(unit_id)),
            }
        }

        if let Some(topic_id) = storage.get(Scope::Durable, keys::LAST_OPEN_TOPIC) {
            match self.topics.iter().find(|t| t.id == topic_id) {
                None => out.stale.push(StaleKey::UnknownTopic(topic_id)),
                Some(topic) if out.unit.as_deref() != Some(topic.parent_unit_id.as_str()) => {
                    out.stale.push(StaleKey::OrphanedTopic {
                        topic: topic_id,
                        parent_unit_id: topic.parent_unit_id.clone(),
                    });
                }
                Some(_) => {
                    if let Ok(patches) = self.toggles.open(&topics, &topic_id) {
                        out.patches.extend(patches);
                        out.topic = Some(topic_id);
                    }
                }
            }
        }

        for stale in &out.stale {
            log::warn!("accordion: not restoring stale key {stale:?}");
        }
        out
    }

    /// Apply a `toggle` event reporting that `id` is now `open`.
    pub fn on_toggle(&mut self, id: &str, open: bool, storage: &Storage) -> Vec<DomPatch> {
        let Some(level) = self.level_of(id) else {
            return Vec::new();
        };
        let group = match level {
            Level::Unit => GroupId::new(UNIT_GROUP),
            Level::Topic => GroupId::new(TOPIC_GROUP),
        };
        if self.toggles.is_open(&group, id).ok() == Some(open) {
            return Vec::new();
        }

        let patches = match self.toggles.set_open(&group, id, open) {
            Ok(patches) => patches,
            Err(err) => {
                log::debug!("accordion: {err}");
                return Vec::new();
            }
        };

        match (level, open) {
            (Level::Unit, true) => storage.set(Scope::Durable, keys::LAST_OPEN_UNIT, id),
            (Level::Unit, false) => {
                storage.remove(Scope::Durable, keys::LAST_OPEN_UNIT);
                storage.remove(Scope::Durable, keys::LAST_OPEN_TOPIC);
            }
            (Level::Topic, true) => storage.set(Scope::Durable, keys::LAST_OPEN_TOPIC, id),
            (Level::Topic, false) => storage.remove(Scope::Durable, keys::LAST_OPEN_TOPIC),
        }
        patches
    }

    fn level_of(&self, id: &str) -> Option<Level> {
        let gid = self.toggles.group_of(id)?;
        if gid.0 == UNIT_GROUP { Some(Level::Unit) } else { Some(Level::Topic) }
    }
}
