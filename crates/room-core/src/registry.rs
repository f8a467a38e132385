//! Object registry: every interactive prop in the room, its resting pose and
//! its animation state, plus the ordered set of objects eligible for
//! hit-testing.
//!
//! Objects are registered once while the scene loads and are never removed;
//! only their live transform, color and [`AnimState`] change afterwards.

use crate::constants::DEFAULT_JUMP_FACTOR;
use crate::error::{InteractionError, Result};
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Local scale/position/rotation. Rotation is XYZ Euler angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vec3,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn new(scale: Vec3, position: Vec3, rotation: Vec3) -> Self {
        Self {
            scale,
            position,
            rotation,
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.position)
    }
}

/// Hover behavior vocabulary attached to props by the scene author.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoverKind {
    Keys,
    Jump,
    Info,
    Ride,
    Guitar,
    Bowie,
    Vinyls,
    Default,
}

impl HoverKind {
    /// Parse an authored tag; matching ignores ASCII case. Unknown tags map to
    /// `Default` so a typo still gets the gentle pop.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        let kind = match tag.to_ascii_lowercase().as_str() {
            "keys" => Self::Keys,
            "jump" => Self::Jump,
            "info" => Self::Info,
            "ride" => Self::Ride,
            "guitar" => Self::Guitar,
            "bowie" => Self::Bowie,
            "vinyls" => Self::Vinyls,
            _ => Self::Default,
        };
        Some(kind)
    }
}

/// Per-object lock state, transitioned only by the animator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimState {
    #[default]
    Idle,
    Animating,
    Cooldown,
}

/// Local-space axis-aligned box used for picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn cube(half_extent: f32) -> Self {
        Self::new(Vec3::splat(-half_extent), Vec3::splat(half_extent))
    }
}

/// What the scene loader knows about a prop.
#[derive(Clone, Debug, Default)]
pub struct ObjectSpec {
    pub name: String,
    pub parent: Option<String>,
    pub hover_tag: Option<String>,
    pub transform: Transform,
    pub bounds: Option<Bounds>,
    pub color: Option<Vec3>,
    pub jump_factor: Option<f32>,
}

impl ObjectSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.hover_tag = Some(tag.into());
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn color(mut self, color: Vec3) -> Self {
        self.color = Some(color);
        self
    }

    pub fn jump_factor(mut self, factor: f32) -> Self {
        self.jump_factor = Some(factor);
        self
    }
}

#[derive(Clone, Debug)]
pub struct InteractiveObject {
    pub id: ObjectId,
    pub name: String,
    pub parent: Option<ObjectId>,
    pub hover: Option<HoverKind>,
    pub live: Transform,
    /// Captured once by [`ObjectRegistry::finish_loading`].
    pub rest: Option<Transform>,
    pub bounds: Option<Bounds>,
    pub color: Option<Vec3>,
    pub base_color: Option<Vec3>,
    pub jump_factor: f32,
    pub state: AnimState,
}

#[derive(Default)]
pub struct ObjectRegistry {
    objects: Vec<InteractiveObject>,
    by_name: FnvHashMap<String, ObjectId>,
    hover_set: Vec<ObjectId>,
    loaded: bool,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prop. Parents must be registered before their children.
    pub fn register(&mut self, spec: ObjectSpec) -> Result<ObjectId> {
        if self.loaded {
            return Err(InteractionError::AlreadyLoaded);
        }
        if self.by_name.contains_key(&spec.name) {
            return Err(InteractionError::DuplicateName(spec.name));
        }
        let parent = match &spec.parent {
            Some(p) => Some(
                self.find(p)
                    .ok_or_else(|| InteractionError::UnknownParent(p.clone()))?,
            ),
            None => None,
        };
        let id = ObjectId(self.objects.len() as u32);
        let hover = spec.hover_tag.as_deref().and_then(HoverKind::parse);
        if spec.bounds.is_some() {
            self.hover_set.push(id);
        }
        self.by_name.insert(spec.name.clone(), id);
        self.objects.push(InteractiveObject {
            id,
            name: spec.name,
            parent,
            hover,
            live: spec.transform,
            rest: None,
            bounds: spec.bounds,
            color: spec.color,
            base_color: None,
            jump_factor: spec.jump_factor.unwrap_or(DEFAULT_JUMP_FACTOR),
            state: AnimState::Idle,
        });
        Ok(id)
    }

    /// Snapshot every rest transform and base color. Runs once per session.
    pub fn finish_loading(&mut self) -> Result<()> {
        if self.loaded {
            return Err(InteractionError::AlreadyLoaded);
        }
        for obj in &mut self.objects {
            obj.rest = Some(obj.live);
            obj.base_color = obj.color;
        }
        self.loaded = true;
        log::info!(
            "[loader] {} objects, {} hittable",
            self.objects.len(),
            self.hover_set.len()
        );
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: ObjectId) -> Option<&InteractiveObject> {
        self.objects.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut InteractiveObject> {
        self.objects.get_mut(id.0 as usize)
    }

    pub fn try_get(&self, id: ObjectId) -> Result<&InteractiveObject> {
        self.get(id).ok_or(InteractionError::UnknownObject(id))
    }

    pub fn try_get_mut(&mut self, id: ObjectId) -> Result<&mut InteractiveObject> {
        self.get_mut(id).ok_or(InteractionError::UnknownObject(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractiveObject> {
        self.objects.iter()
    }

    pub fn state(&self, id: ObjectId) -> AnimState {
        self.get(id).map(|o| o.state).unwrap_or_default()
    }

    pub fn set_state(&mut self, id: ObjectId, state: AnimState) {
        if let Some(o) = self.get_mut(id) {
            o.state = state;
        }
    }

    pub fn hover_set(&self) -> &[ObjectId] {
        &self.hover_set
    }

    pub fn in_hover_set(&self, id: ObjectId) -> bool {
        self.hover_set.contains(&id)
    }

    /// Re-admit a hover root to hit-testing, along with every hittable child
    /// that resolves to it. Idempotent.
    pub fn insert_hover(&mut self, root: ObjectId) {
        for id in self.hover_members(root) {
            if !self.hover_set.contains(&id) {
                self.hover_set.push(id);
            }
        }
    }

    /// Take a hover root and every hittable child that resolves to it out of
    /// hit-testing.
    pub fn remove_hover(&mut self, root: ObjectId) {
        let members = self.hover_members(root);
        self.hover_set.retain(|h| !members.contains(h));
    }

    /// True while any hittable part of `root` can be hit.
    pub fn root_hittable(&self, root: ObjectId) -> bool {
        self.hover_members(root)
            .iter()
            .any(|id| self.hover_set.contains(id))
    }

    fn hover_members(&self, root: ObjectId) -> SmallVec<[ObjectId; 4]> {
        self.objects
            .iter()
            .filter(|o| o.bounds.is_some() && (o.id == root || self.hover_root(o.id) == root))
            .map(|o| o.id)
            .collect()
    }

    /// Compose local transforms along the parent chain.
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let obj = self.get(id)?;
        let local = obj.live.matrix();
        match obj.parent {
            Some(p) => Some(self.world_matrix(p)? * local),
            None => Some(local),
        }
    }

    /// The object that owns hover state for a hit: the hit itself, unless it
    /// is untagged and its immediate parent is tagged.
    pub fn hover_root(&self, hit: ObjectId) -> ObjectId {
        let Some(obj) = self.get(hit) else {
            return hit;
        };
        if obj.hover.is_some() {
            return hit;
        }
        match obj.parent.and_then(|p| self.get(p)) {
            Some(parent) if parent.hover.is_some() => parent.id,
            _ => hit,
        }
    }
}
