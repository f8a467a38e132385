//! Interaction controller: owns the registry, animator, hover resolver, modal
//! gate and click routing, and talks to the platform through
//! [`InteractionHost`].
//!
//! The render loop calls [`Interaction::frame`] once per display frame; input
//! handlers call the pointer/touch/click methods as events arrive.

use crate::camera::Camera;
use crate::click::{self, LinkTable, TapFilter};
use crate::dispatcher::Animator;
use crate::error::Result;
use crate::hover::{CursorHint, HoverResolver};
use crate::modal::{ModalGate, ModalId, ModalSettled};
use crate::registry::ObjectRegistry;
use glam::Vec2;

/// Platform capabilities the interaction layer drives but does not own.
pub trait InteractionHost {
    fn set_cursor(&mut self, hint: CursorHint);
    /// Open `url` in a new browsing context without opener linkage.
    fn open_link(&mut self, url: &str);
    fn show_modal(&mut self, id: ModalId);
    fn hide_modal(&mut self, id: ModalId);
    /// Fade/scale progress of the active modal in 0..1.
    fn modal_visibility(&mut self, _id: ModalId, _visibility: f32) {}
    /// Enable or disable orbit/camera input.
    fn set_camera_input(&mut self, enabled: bool);
}

/// Latest camera-input request, held until the host can deliver it outside
/// any borrow of the interaction state. Later requests overwrite earlier ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraInputLatch(Option<bool>);

impl CameraInputLatch {
    pub fn set(&mut self, enabled: bool) {
        self.0 = Some(enabled);
    }

    pub fn take(&mut self) -> Option<bool> {
        self.0.take()
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }
}

#[derive(Default)]
pub struct Interaction {
    registry: ObjectRegistry,
    animator: Animator,
    hover: HoverResolver,
    modal: ModalGate,
    links: LinkTable,
    taps: TapFilter,
    camera: Camera,
    pointer_ndc: Option<Vec2>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_links(links: LinkTable) -> Self {
        Self {
            links,
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Loader access. Registration closes once [`Self::finish_loading`] runs.
    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn finish_loading(&mut self) -> Result<()> {
        self.registry.finish_loading()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn hover(&self) -> &HoverResolver {
        &self.hover
    }

    pub fn modal(&self) -> &ModalGate {
        &self.modal
    }

    pub fn links_mut(&mut self) -> &mut LinkTable {
        &mut self.links
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn pointer_move(&mut self, ndc: Vec2) {
        self.pointer_ndc = Some(ndc);
    }

    /// Pointer left the surface: nothing is under it any more.
    pub fn pointer_leave(&mut self) {
        self.pointer_ndc = None;
    }

    pub fn pointer_down(&mut self, px: Vec2, ndc: Vec2) {
        self.taps.pointer_down(px);
        self.pointer_ndc = Some(ndc);
    }

    pub fn touch_start(&mut self, px: Vec2, ndc: Vec2) {
        self.pointer_down(px, ndc);
    }

    /// A touch release that is not a drag is a tap; it also arms suppression
    /// of the synthetic click that follows.
    pub fn touch_end(&mut self, px: Vec2, ndc: Vec2, now_ms: f64, host: &mut impl InteractionHost) {
        let confirmed = self.taps.release(px);
        self.taps.touch_handled(now_ms);
        self.pointer_ndc = Some(ndc);
        if confirmed {
            self.tap(ndc, now_ms, host);
        }
    }

    pub fn click(&mut self, px: Vec2, ndc: Vec2, now_ms: f64, host: &mut impl InteractionHost) {
        if self.taps.suppress_click(now_ms) {
            log::debug!("[click] synthetic click after touch skipped");
            return;
        }
        if !self.taps.release(px) {
            log::debug!("[click] drag release ignored");
            return;
        }
        self.tap(ndc, now_ms, host);
    }

    fn tap(&mut self, ndc: Vec2, now_ms: f64, host: &mut impl InteractionHost) {
        if !self.registry.is_loaded() || self.modal.is_open() {
            return;
        }
        let ray = self.camera.ray_from_ndc(ndc);
        let Some(hit) = self.hover.refresh_hits(&self.registry, Some(&ray)) else {
            return;
        };
        let actions = click::route(&self.registry, &self.links, hit.object);
        if let Some(url) = &actions.link {
            log::info!("[click] opening {}", url);
            host.open_link(url);
        }
        if let Some(id) = actions.modal {
            self.open_modal(id, now_ms, host);
        }
        if let Some(key) = actions.key_press {
            if let Err(e) = self.animator.press_key(&mut self.registry, key) {
                log::debug!("[click] key press skipped: {}", e);
            }
        }
    }

    /// Per-frame hover pass. Skipped while loading or while a modal is open.
    pub fn update_hover(&mut self, host: &mut impl InteractionHost) {
        if !self.registry.is_loaded() {
            return;
        }
        let ray = self.pointer_ndc.map(|ndc| self.camera.ray_from_ndc(ndc));
        let modal_open = self.modal.is_open();
        if let Some(hint) =
            self.hover
                .update(&mut self.registry, &mut self.animator, ray.as_ref(), modal_open)
        {
            host.set_cursor(hint);
        }
    }

    /// Advance animations and modal transitions by `dt` seconds.
    pub fn tick(&mut self, dt: f32, host: &mut impl InteractionHost) {
        self.animator.update(dt, &mut self.registry);
        let transitioning = self.modal.in_transition();
        let settled = self.modal.update(dt);
        if transitioning {
            let id = match settled {
                Some(ModalSettled::Opened(id) | ModalSettled::Closed(id)) => Some(id),
                None => self.modal.active(),
            };
            if let Some(id) = id {
                host.modal_visibility(id, self.modal.visibility());
            }
        }
        match settled {
            Some(ModalSettled::Closed(id)) => {
                host.hide_modal(id);
                host.set_camera_input(true);
            }
            Some(ModalSettled::Opened(_)) | None => {}
        }
    }

    /// Render-loop entry point.
    pub fn frame(&mut self, dt: f32, host: &mut impl InteractionHost) {
        self.tick(dt, host);
        self.update_hover(host);
    }

    pub fn open_modal(&mut self, id: ModalId, now_ms: f64, host: &mut impl InteractionHost) {
        if let Err(e) = self.modal.open(id, now_ms) {
            log::debug!("[modal] open {} rejected: {}", id.as_str(), e);
            return;
        }
        host.set_camera_input(false);
        if let Some(hint) = self.hover.release(&mut self.registry, &mut self.animator) {
            host.set_cursor(hint);
        }
        host.show_modal(id);
        host.modal_visibility(id, self.modal.visibility());
    }

    pub fn close_modal(&mut self, id: ModalId) {
        if let Err(e) = self.modal.close(id) {
            log::debug!("[modal] close {} rejected: {}", id.as_str(), e);
        }
    }

    /// Overlay/escape close, debounced against the opening tap.
    pub fn attempt_close(&mut self, now_ms: f64) {
        if let Err(e) = self.modal.attempt_close(now_ms) {
            log::debug!("[modal] close skipped: {}", e);
        }
    }
}
