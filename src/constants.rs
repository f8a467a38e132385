use room_core::ModalId;

// DOM element ids and classes the front-end expects in index.html.

pub const DEFAULT_CANVAS_ID: &str = "app-canvas";
pub const MODAL_OVERLAY_ID: &str = "modal-overlay";
pub const MODAL_CLOSE_CLASS: &str = "modal-close";

// Longest frame step fed to the animator; a backgrounded tab resumes with a
// jump rather than a very long step.
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

#[inline]
pub fn modal_element_id(id: ModalId) -> &'static str {
    match id {
        ModalId::Work => "work-modal",
        ModalId::About => "about-modal",
        ModalId::Contact => "contact-modal",
    }
}
