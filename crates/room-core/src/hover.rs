//! Per-frame hover resolution: ray cast into the hover set, resolve the hover
//! root and fire exit/enter on transitions.

use crate::camera::Ray;
use crate::constants::POINTER_NAME_MARKER;
use crate::dispatcher::Animator;
use crate::registry::{ObjectId, ObjectRegistry};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub object: ObjectId,
    pub distance: f32,
}

pub type Hits = SmallVec<[Hit; 4]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
    pub current: Option<ObjectId>,
    pub hits: Hits,
}

/// Every hover-set object under `ray`, nearest first.
pub fn raycast(reg: &ObjectRegistry, ray: &Ray) -> Hits {
    let mut hits: Hits = reg
        .hover_set()
        .iter()
        .filter_map(|&id| {
            let bounds = reg.get(id)?.bounds?;
            let model = reg.world_matrix(id)?;
            let distance = ray.intersect_box(model, bounds.min, bounds.max)?;
            Some(Hit {
                object: id,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[derive(Default)]
pub struct HoverResolver {
    state: HoverState,
    cursor: CursorHint,
}

impl HoverResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    pub fn current(&self) -> Option<ObjectId> {
        self.state.current
    }

    pub fn top_hit(&self) -> Option<Hit> {
        self.state.hits.first().copied()
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Re-run the hit test without touching hover transitions; used by taps
    /// that arrive before the next frame.
    pub fn refresh_hits(&mut self, reg: &ObjectRegistry, ray: Option<&Ray>) -> Option<Hit> {
        self.state.hits = ray.map(|r| raycast(reg, r)).unwrap_or_default();
        self.top_hit()
    }

    /// One frame of hover tracking. Returns the new cursor hint when it
    /// changes. Does nothing at all while a modal is open.
    pub fn update(
        &mut self,
        reg: &mut ObjectRegistry,
        anim: &mut Animator,
        ray: Option<&Ray>,
        modal_open: bool,
    ) -> Option<CursorHint> {
        if modal_open {
            return None;
        }
        self.refresh_hits(reg, ray);
        let root = self.top_hit().map(|h| reg.hover_root(h.object));

        if root != self.state.current {
            let set_piece = anim.set_piece_playing(reg);
            if let Some(prev) = self.state.current {
                let shielded = set_piece && anim.is_set_piece_member(reg, prev);
                if !shielded && !anim.is_busy(reg, prev) {
                    anim.apply_hover_state(reg, prev, false);
                }
            }
            if let Some(next) = root {
                let shielded = set_piece && anim.is_set_piece_member(reg, next);
                if shielded {
                    log::debug!("[hover] {:?} shielded by set piece", next);
                } else {
                    anim.apply_hover_state(reg, next, true);
                }
            }
            self.state.current = root;
        }

        let hint = match root.and_then(|id| reg.get(id)) {
            Some(o) if o.name.contains(POINTER_NAME_MARKER) => CursorHint::Pointer,
            _ => CursorHint::Default,
        };
        self.set_cursor(hint)
    }

    /// Drop the current hover, restoring it unless an exclusive sequence
    /// owns it. Used when a modal opens.
    pub fn release(&mut self, reg: &mut ObjectRegistry, anim: &mut Animator) -> Option<CursorHint> {
        if let Some(prev) = self.state.current.take() {
            if !anim.is_busy(reg, prev) {
                anim.apply_hover_state(reg, prev, false);
            }
        }
        self.state.hits.clear();
        self.set_cursor(CursorHint::Default)
    }

    fn set_cursor(&mut self, hint: CursorHint) -> Option<CursorHint> {
        if hint == self.cursor {
            return None;
        }
        self.cursor = hint;
        Some(hint)
    }
}
