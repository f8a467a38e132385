// Shared fixtures for the host-side tests: a small room laid out in front of
// a fixed camera and a host that records every call.

#![allow(dead_code)]
use glam::{Vec2, Vec3};
use room_core::*;

pub const STEP: f32 = 1.0 / 60.0;

pub fn camera() -> Camera {
    Camera {
        eye: Vec3::new(0.0, 0.0, 10.0),
        target: Vec3::ZERO,
        ..Camera::default()
    }
}

/// NDC at which `p` appears on screen.
pub fn ndc_of(cam: &Camera, p: Vec3) -> Vec2 {
    let clip = cam.projection_matrix() * cam.view_matrix() * p.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

pub fn ray_at(cam: &Camera, p: Vec3) -> Ray {
    cam.ray_from_ndc(ndc_of(cam, p))
}

pub fn boxed(name: &str, tag: Option<&str>, pos: Vec3) -> ObjectSpec {
    let spec = ObjectSpec::new(name)
        .transform(Transform::at(pos))
        .bounds(Bounds::cube(0.4));
    match tag {
        Some(t) => spec.tag(t),
        None => spec,
    }
}

pub const KEY: Vec3 = Vec3::new(-3.0, 0.0, 0.0);
pub const JUMP: Vec3 = Vec3::new(-1.5, 0.0, 0.0);
pub const CHAIR: Vec3 = Vec3::new(1.5, 0.0, 0.0);
pub const GUITAR: Vec3 = Vec3::new(3.0, 0.0, 0.0);
pub const FRAME: Vec3 = Vec3::new(0.0, 2.0, 0.0);
pub const GITHUB: Vec3 = Vec3::new(-1.5, 2.0, 0.0);
pub const WORK: Vec3 = Vec3::new(1.5, 2.0, 0.0);
pub const LAMP: Vec3 = Vec3::new(3.0, 2.0, 0.0);
pub const SHELF: Vec3 = Vec3::new(0.0, -2.0, 0.0);
pub const BOWIE: Vec3 = Vec3::new(-3.0, -2.0, 0.0);
pub const RECORD: Vec3 = Vec3::new(3.0, -2.0, 0.0);
pub const PLAYER: Vec3 = Vec3::new(3.0, -3.0, 0.0);
pub const EMPTY: Vec3 = Vec3::new(0.0, 0.0, 0.0);

pub fn room_specs() -> Vec<ObjectSpec> {
    vec![
        boxed("Piano_Key_C", Some("keys"), KEY),
        boxed("Jump_Box", Some("jump"), JUMP).jump_factor(1.5),
        ObjectSpec::new("Frame_Group")
            .tag("info")
            .transform(Transform::at(FRAME)),
        ObjectSpec::new("Frame_Glass")
            .parent("Frame_Group")
            .bounds(Bounds::cube(0.4)),
        boxed("Chair_Pointer", Some("ride"), CHAIR),
        boxed("Guitar", Some("Guitar"), GUITAR),
        boxed("Github_Pointer", None, GITHUB),
        boxed("My_Work_Pointer", None, WORK),
        boxed("Lamp", None, LAMP).color(Vec3::new(1.0, 0.9, 0.7)),
        boxed("Vinyl_Shelf", Some("vinyls"), SHELF),
        boxed("Bowie_Vinyl", Some("bowie"), BOWIE),
        boxed("Record", None, RECORD),
        boxed("Record_Player", None, PLAYER),
    ]
}

pub fn loaded_registry() -> ObjectRegistry {
    let mut reg = ObjectRegistry::new();
    for spec in room_specs() {
        reg.register(spec).expect("register");
    }
    reg.finish_loading().expect("finish loading");
    reg
}

pub fn loaded_interaction() -> Interaction {
    let mut inter = Interaction::new();
    for spec in room_specs() {
        inter.registry_mut().register(spec).expect("register");
    }
    inter.finish_loading().expect("finish loading");
    inter.set_camera(camera());
    inter
}

pub fn id(reg: &ObjectRegistry, name: &str) -> ObjectId {
    reg.find(name).unwrap_or_else(|| panic!("no object {name}"))
}

pub fn live(reg: &ObjectRegistry, name: &str) -> Transform {
    reg.get(id(reg, name)).unwrap().live
}

/// Step the animator in 60 Hz frames for `secs` seconds.
pub fn advance(anim: &mut Animator, reg: &mut ObjectRegistry, secs: f32) {
    let steps = (secs / STEP).round() as usize;
    for _ in 0..steps {
        anim.update(STEP, reg);
    }
}

/// Step the whole interaction (ticks + hover) for `secs` seconds.
pub fn run(inter: &mut Interaction, host: &mut RecordingHost, secs: f32) {
    let steps = (secs / STEP).round() as usize;
    for _ in 0..steps {
        inter.frame(STEP, host);
    }
}

pub fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-3
}

#[derive(Default)]
pub struct RecordingHost {
    pub cursors: Vec<CursorHint>,
    pub links: Vec<String>,
    pub shown: Vec<ModalId>,
    pub hidden: Vec<ModalId>,
    pub visibility: Vec<(ModalId, f32)>,
    pub camera_input: Vec<bool>,
}

impl InteractionHost for RecordingHost {
    fn set_cursor(&mut self, hint: CursorHint) {
        self.cursors.push(hint);
    }
    fn open_link(&mut self, url: &str) {
        self.links.push(url.to_string());
    }
    fn show_modal(&mut self, id: ModalId) {
        self.shown.push(id);
    }
    fn hide_modal(&mut self, id: ModalId) {
        self.hidden.push(id);
    }
    fn modal_visibility(&mut self, id: ModalId, visibility: f32) {
        self.visibility.push((id, visibility));
    }
    fn set_camera_input(&mut self, enabled: bool) {
        self.camera_input.push(enabled);
    }
}
