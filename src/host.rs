use crate::constants::modal_element_id;
use crate::dom;
use crate::SharedRef;
use room_core::{CameraInputLatch, CursorHint, InteractionHost, ModalId};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Browser side of the interaction layer: modal elements, cursor style,
/// link navigation and the renderer's camera-input switch.
pub struct DomHost {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    camera_input: Option<js_sys::Function>,
    pending_camera_input: CameraInputLatch,
}

impl DomHost {
    pub fn new(document: web::Document, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            document,
            canvas,
            camera_input: None,
            pending_camera_input: CameraInputLatch::default(),
        }
    }

    /// JavaScript callback receiving `true`/`false` to toggle orbit controls.
    pub fn set_camera_input_callback(&mut self, callback: js_sys::Function) {
        self.camera_input = Some(callback);
    }

    fn modal_element(&self, id: ModalId) -> Option<web::HtmlElement> {
        self.document
            .get_element_by_id(modal_element_id(id))
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    }
}

impl InteractionHost for DomHost {
    fn set_cursor(&mut self, hint: CursorHint) {
        let value = match hint {
            CursorHint::Pointer => "pointer",
            CursorHint::Default => "default",
        };
        dom::set_style(&self.canvas, "cursor", value);
    }

    fn open_link(&mut self, url: &str) {
        let Some(window) = web::window() else {
            return;
        };
        if let Err(e) = window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer") {
            log::warn!("[click] window.open failed: {:?}", e);
        }
    }

    fn show_modal(&mut self, id: ModalId) {
        if let Some(el) = self.modal_element(id) {
            _ = el.class_list().add_1("open");
            dom::set_style(&el, "display", "block");
            dom::set_style(&el, "opacity", "0");
        }
    }

    fn hide_modal(&mut self, id: ModalId) {
        if let Some(el) = self.modal_element(id) {
            _ = el.class_list().remove_1("open");
            dom::set_style(&el, "display", "none");
        }
    }

    fn modal_visibility(&mut self, id: ModalId, visibility: f32) {
        if let Some(el) = self.modal_element(id) {
            dom::set_style(&el, "opacity", &format!("{:.3}", visibility));
            let scale = 0.9 + 0.1 * visibility;
            dom::set_style(&el, "transform", &format!("scale({:.3})", scale));
        }
    }

    fn set_camera_input(&mut self, enabled: bool) {
        self.pending_camera_input.set(enabled);
    }
}

/// Deliver a queued camera-input change. Runs with no borrow of the shared
/// state held, so the callback may call back into `RoomInteraction`.
pub fn flush_camera_input(shared: &SharedRef) {
    let pending = {
        let mut guard = shared.borrow_mut();
        let host = &mut guard.host;
        host.pending_camera_input
            .take()
            .zip(host.camera_input.clone())
    };
    if let Some((enabled, f)) = pending {
        if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from_bool(enabled)) {
            log::warn!("[modal] camera input callback failed: {:?}", e);
        }
    }
}
