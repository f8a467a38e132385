//! Click routing and tap filtering.

use crate::constants::{DRAG_THRESHOLD_PX, TOUCH_CLICK_SUPPRESS_MS};
use crate::modal::ModalId;
use crate::registry::{HoverKind, ObjectId, ObjectRegistry};
use glam::Vec2;

/// Name-fragment to URL table consulted in insertion order.
#[derive(Clone, Debug)]
pub struct LinkTable {
    entries: Vec<(String, String)>,
}

impl Default for LinkTable {
    fn default() -> Self {
        Self::new([
            ("Github", "https://github.com/"),
            ("LinkedIn", "https://www.linkedin.com/"),
            ("YouTube", "https://www.youtube.com/"),
        ])
    }
}

impl LinkTable {
    pub fn new<K: Into<String>, V: Into<String>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the URL for `fragment`.
    pub fn set(&mut self, fragment: &str, url: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == fragment) {
            Some(entry) => entry.1 = url.to_string(),
            None => self.entries.push((fragment.to_string(), url.to_string())),
        }
    }

    pub fn lookup(&self, object_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| !k.is_empty() && object_name.contains(k.as_str()))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a confirmed click on one object asks for. The link and modal
/// checks are exclusive of each other; the key press is independent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClickActions {
    pub link: Option<String>,
    pub modal: Option<ModalId>,
    pub key_press: Option<ObjectId>,
}

impl ClickActions {
    pub fn is_empty(&self) -> bool {
        self.link.is_none() && self.modal.is_none() && self.key_press.is_none()
    }
}

pub fn route(reg: &ObjectRegistry, links: &LinkTable, hit: ObjectId) -> ClickActions {
    let Some(obj) = reg.get(hit) else {
        return ClickActions::default();
    };
    let link = links.lookup(&obj.name).map(str::to_string);
    let modal = match link {
        Some(_) => None,
        None => ModalId::from_object_name(&obj.name),
    };
    let root = reg.hover_root(hit);
    let key_press = reg
        .get(root)
        .filter(|o| o.hover == Some(HoverKind::Keys))
        .map(|o| o.id);
    ClickActions {
        link,
        modal,
        key_press,
    }
}

/// Separates real clicks/taps from drag releases and swallows the synthetic
/// click a browser fires after a handled touch.
#[derive(Clone, Copy, Debug, Default)]
pub struct TapFilter {
    down_px: Option<Vec2>,
    last_touch_end_ms: Option<f64>,
}

impl TapFilter {
    pub fn pointer_down(&mut self, px: Vec2) {
        self.down_px = Some(px);
    }

    /// Consume the press. A release with no recorded press counts as a click.
    pub fn release(&mut self, px: Vec2) -> bool {
        match self.down_px.take() {
            Some(down) => down.distance(px) <= DRAG_THRESHOLD_PX,
            None => true,
        }
    }

    pub fn touch_handled(&mut self, now_ms: f64) {
        self.last_touch_end_ms = Some(now_ms);
    }

    pub fn suppress_click(&self, now_ms: f64) -> bool {
        self.last_touch_end_ms
            .is_some_and(|t| now_ms - t < TOUCH_CLICK_SUPPRESS_MS)
    }
}
