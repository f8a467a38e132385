use crate::constants::{modal_element_id, MODAL_CLOSE_CLASS, MODAL_OVERLAY_ID};
use crate::dom::{self, Listener};
use crate::SharedRef;
use room_core::ModalId;
use web_sys as web;

/// Escape asks the open modal to close (subject to the open debounce).
pub fn wire_escape_close(shared: &SharedRef, window: &web::Window) -> Option<Listener> {
    let s = shared.clone();
    dom::listen(window.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        let mut guard = s.borrow_mut();
        if !guard.interaction.is_modal_open() {
            return;
        }
        let now = guard.now_ms();
        guard.interaction.attempt_close(now);
        ev.prevent_default();
    })
}

/// Overlay backdrop clicks and per-modal close buttons.
pub fn wire_modal_controls(shared: &SharedRef, document: &web::Document) -> Vec<Listener> {
    let mut out = Vec::new();

    if let Some(overlay) = document.get_element_by_id(MODAL_OVERLAY_ID) {
        let s = shared.clone();
        out.extend(dom::listen(overlay.as_ref(), "click", move |ev: web::MouseEvent| {
            // only the backdrop itself, not clicks bubbling from modal content
            if ev.target() != ev.current_target() {
                return;
            }
            let mut guard = s.borrow_mut();
            let now = guard.now_ms();
            guard.interaction.attempt_close(now);
        }));
    }

    for id in ModalId::ALL {
        let Some(modal) = document.get_element_by_id(modal_element_id(id)) else {
            log::warn!("[modal] #{} missing", modal_element_id(id));
            continue;
        };
        let selector = format!(".{}", MODAL_CLOSE_CLASS);
        let Ok(Some(button)) = modal.query_selector(&selector) else {
            continue;
        };
        let s = shared.clone();
        out.extend(dom::listen(button.as_ref(), "click", move |ev: web::MouseEvent| {
            ev.stop_propagation();
            s.borrow_mut().interaction.close_modal(id);
        }));
    }

    out
}
