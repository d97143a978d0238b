//! Exclusive toggle groups.
//!
//! DESIGN
//! ======
//! A group is an ordered set of boolean widgets of which at most one may be
//! open. The rule is enforced reactively: opening a member forces every open
//! sibling closed by direct state mutation, and the returned patches bring the
//! DOM in line. Forced closures never reach other groups.

use std::collections::BTreeMap;

use crate::dom::DomPatch;
use crate::error::ToggleError;

#[cfg(test)]
#[path = "toggle_test.rs"]
mod toggle_test;

/// Identifier of a toggle group (selector or semantic tag).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub String);

impl GroupId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// How a widget stores its boolean state in the DOM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    /// `<input type="checkbox">`, state in `checked`.
    Checkbox,
    /// `<details>`, state in `open`.
    Disclosure,
}

/// One boolean UI element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleWidget {
    pub id: String,
    pub open: bool,
    pub kind: WidgetKind,
}

impl ToggleWidget {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: WidgetKind, open: bool) -> Self {
        Self { id: id.into(), open, kind }
    }

    fn patch(&self) -> DomPatch {
        match self.kind {
            WidgetKind::Checkbox => DomPatch::SetChecked { id: self.id.clone(), checked: self.open },
            WidgetKind::Disclosure => DomPatch::SetOpen { id: self.id.clone(), open: self.open },
        }
    }
}

/// Ordered members of one exclusive group.
#[derive(Clone, Debug, Default)]
struct ToggleGroup {
    members: Vec<ToggleWidget>,
}

impl ToggleGroup {
    fn position(&self, id: &str) -> Option<usize> {
        self.members.iter().position(|w| w.id == id)
    }
}

/// All exclusive groups on a page.
#[derive(Clone, Debug, Default)]
pub struct ToggleManager {
    groups: BTreeMap<GroupId, ToggleGroup>,
}

impl ToggleManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a group with its members in document order.
    pub fn register_group(&mut self, group: GroupId, members: Vec<ToggleWidget>) {
        self.groups.insert(group, ToggleGroup { members });
    }

    /// Group containing widget `id`, if any.
    #[must_use]
    pub fn group_of(&self, id: &str) -> Option<&GroupId> {
        self.groups
            .iter()
            .find(|(_, g)| g.position(id).is_some())
            .map(|(gid, _)| gid)
    }

    pub fn is_open(&self, group: &GroupId, id: &str) -> Result<bool, ToggleError> {
        let (g, idx) = self.locate(group, id)?;
        Ok(g.members[idx].open)
    }

    /// The open member of `group`, if any.
    #[must_use]
    pub fn open_member(&self, group: &GroupId) -> Option<&str> {
        self.groups
            .get(group)?
            .members
            .iter()
            .find(|w| w.open)
            .map(|w| w.id.as_str())
    }

    /// Open `id` and force its open siblings closed.
    ///
    /// Opening an already open widget is a no-op and returns no patches.
    pub fn open(&mut self, group: &GroupId, id: &str) -> Result<Vec<DomPatch>, ToggleError> {
        let idx = self.locate(group, id)?.1;
        let Some(g) = self.groups.get_mut(group) else {
            return Err(ToggleError::UnknownGroup(group.0.clone()));
        };
        if g.members[idx].open {
            return Ok(Vec::new());
        }

        let mut patches = Vec::new();
        for (i, sibling) in g.members.iter_mut().enumerate() {
            if i != idx && sibling.open {
                sibling.open = false;
                patches.push(sibling.patch());
            }
        }
        let target = &mut g.members[idx];
        target.open = true;
        patches.push(target.patch());
        Ok(patches)
    }

    /// Close `id`. Closing a closed widget returns no patches.
    pub fn close(&mut self, group: &GroupId, id: &str) -> Result<Vec<DomPatch>, ToggleError> {
        let idx = self.locate(group, id)?.1;
        let Some(g) = self.groups.get_mut(group) else {
            return Err(ToggleError::UnknownGroup(group.0.clone()));
        };
        let target = &mut g.members[idx];
        if !target.open {
            return Ok(Vec::new());
        }
        target.open = false;
        Ok(vec![target.patch()])
    }

    /// Event entry point: the DOM reports that `id` is now `open`.
    ///
    /// The widget itself already shows the new state, so only sibling
    /// closures are returned.
    pub fn set_open(&mut self, group: &GroupId, id: &str, open: bool) -> Result<Vec<DomPatch>, ToggleError> {
        let mut patches = if open { self.open(group, id)? } else { self.close(group, id)? };
        patches.retain(|p| p.target_id() != Some(id));
        Ok(patches)
    }

    fn locate(&self, group: &GroupId, id: &str) -> Result<(&ToggleGroup, usize), ToggleError> {
        let g = self
            .groups
            .get(group)
            .ok_or_else(|| ToggleError::UnknownGroup(group.0.clone()))?;
        let idx = g.position(id).ok_or_else(|| ToggleError::UnknownWidget {
            group: group.0.clone(),
            widget: id.to_owned(),
        })?;
        Ok((g, idx))
    }
}
