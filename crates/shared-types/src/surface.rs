//! # Render Surface
//!
//! The output side of the dashboard: a set of named slots that widgets
//! project state into. Which slots exist depends on the page layout, and
//! feature applicability checks ask the surface whether a slot is present.
//!
//! Writes to a slot that does not exist are silently ignored, so a widget
//! can render unconditionally and only the slots present on the current
//! page change.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use parking_lot::RwLock;
use serde::Serialize;

/// One named output region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Text content.
    pub text: String,
    /// Whether the slot is shown.
    pub visible: bool,
    /// Relative width for bars and progress fills.
    pub width_percent: Option<i64>,
    /// Free-form attributes (titles, labels, style variables).
    pub attrs: BTreeMap<String, String>,
    /// Style classes.
    pub classes: BTreeSet<String>,
    /// List content, first item on top.
    pub items: Vec<String>,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            text: String::new(),
            visible: true,
            width_percent: None,
            attrs: BTreeMap::new(),
            classes: BTreeSet::new(),
            items: Vec::new(),
        }
    }
}

/// Named-slot render target shared by all mounted widgets.
#[derive(Debug, Default)]
pub struct Surface {
    slots: RwLock<BTreeMap<String, Slot>>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface with the given (empty) slots.
    pub fn with_slots<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let surface = Self::new();
        for id in ids {
            surface.add_slot(id);
        }
        surface
    }

    /// Add an empty slot; an existing slot is left untouched.
    pub fn add_slot(&self, id: impl Into<String>) {
        self.slots.write().entry(id.into()).or_default();
    }

    pub fn has(&self, id: &str) -> bool {
        self.slots.read().contains_key(id)
    }

    /// True when at least one of `ids` exists.
    pub fn has_any(&self, ids: &[&str]) -> bool {
        let slots = self.slots.read();
        ids.iter().any(|id| slots.contains_key(*id))
    }

    /// Slot ids in sorted order.
    pub fn ids(&self) -> Vec<String> {
        self.slots.read().keys().cloned().collect()
    }

    /// Mutate a slot in place. Returns `None` when the slot is absent.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut Slot) -> R) -> Option<R> {
        self.slots.write().get_mut(id).map(f)
    }

    pub fn slot(&self, id: &str) -> Option<Slot> {
        self.slots.read().get(id).cloned()
    }

    pub fn set_text(&self, id: &str, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update(id, |slot| slot.text = text).is_some()
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.slots.read().get(id).map(|slot| slot.text.clone())
    }

    pub fn set_visible(&self, id: &str, visible: bool) -> bool {
        self.update(id, |slot| slot.visible = visible).is_some()
    }

    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.slots.read().get(id).map(|slot| slot.visible)
    }

    pub fn set_width(&self, id: &str, percent: i64) -> bool {
        self.update(id, |slot| slot.width_percent = Some(percent))
            .is_some()
    }

    pub fn width(&self, id: &str) -> Option<i64> {
        self.slots.read().get(id).and_then(|slot| slot.width_percent)
    }

    pub fn set_attr(&self, id: &str, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(id, |slot| {
            slot.attrs.insert(key.to_string(), value);
        })
        .is_some()
    }

    pub fn attr(&self, id: &str, key: &str) -> Option<String> {
        self.slots
            .read()
            .get(id)
            .and_then(|slot| slot.attrs.get(key).cloned())
    }

    pub fn toggle_class(&self, id: &str, class: &str, on: bool) -> bool {
        self.update(id, |slot| {
            if on {
                slot.classes.insert(class.to_string());
            } else {
                slot.classes.remove(class);
            }
        })
        .is_some()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.slots
            .read()
            .get(id)
            .is_some_and(|slot| slot.classes.contains(class))
    }

    pub fn set_items(&self, id: &str, items: Vec<String>) -> bool {
        self.update(id, |slot| slot.items = items).is_some()
    }

    pub fn prepend_item(&self, id: &str, item: impl Into<String>) -> bool {
        let item = item.into();
        self.update(id, |slot| slot.items.insert(0, item)).is_some()
    }

    pub fn items(&self, id: &str) -> Vec<String> {
        self.slots
            .read()
            .get(id)
            .map(|slot| slot.items.clone())
            .unwrap_or_default()
    }

    /// Plain-text dump of every visible, non-empty slot.
    pub fn render(&self) -> String {
        let slots = self.slots.read();
        let mut out = String::new();
        for (id, slot) in slots.iter().filter(|(_, s)| s.visible) {
            if slot.text.is_empty() && slot.items.is_empty() && slot.width_percent.is_none() {
                continue;
            }
            let _ = write!(out, "{id}: {}", slot.text);
            if let Some(width) = slot.width_percent {
                let _ = write!(out, " [{width}%]");
            }
            if !slot.classes.is_empty() {
                let classes: Vec<&str> = slot.classes.iter().map(String::as_str).collect();
                let _ = write!(out, " ({})", classes.join(" "));
            }
            out.push('\n');
            for item in &slot.items {
                let _ = writeln!(out, "  - {item}");
            }
        }
        out
    }
}
