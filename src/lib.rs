#![cfg(target_arch = "wasm32")]
use anyhow::Context;
use glam::Vec3;
use instant::Instant;
use room_core::{Bounds, Camera, Interaction, ModalId, ObjectSpec, Transform};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod host;
mod input;

use host::DomHost;

/// State shared between the frame loop, DOM listeners and the JS facade.
pub(crate) struct Shared {
    pub interaction: Interaction,
    pub host: DomHost,
    pub clock: Instant,
}

impl Shared {
    pub fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }
}

pub(crate) type SharedRef = Rc<RefCell<Shared>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("room-web starting");
    Ok(())
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

fn vec3(values: &[f32], at: usize) -> Option<Vec3> {
    values.get(at..at + 3).map(Vec3::from_slice)
}

fn parse_modal(id: &str) -> Option<ModalId> {
    ModalId::ALL.into_iter().find(|m| m.as_str() == id)
}

fn find_canvas(document: &web::Document, canvas_id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(canvas_id)
        .with_context(|| format!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", canvas_id, e))
}

impl RoomInteraction {
    fn build(canvas_id: &str) -> anyhow::Result<RoomInteraction> {
        let document = dom::window_document().context("no window/document")?;
        let canvas = find_canvas(&document, canvas_id)?;
        let shared = Rc::new(RefCell::new(Shared {
            interaction: Interaction::new(),
            host: DomHost::new(document.clone(), canvas.clone()),
            clock: Instant::now(),
        }));
        Ok(RoomInteraction {
            shared,
            canvas,
            document,
            listeners: Vec::new(),
            frame_loop: None,
        })
    }
}

/// JavaScript-facing handle. The renderer registers the room's props once the
/// model has loaded, feeds the camera every frame and mirrors the live
/// transforms back onto its scene graph.
#[wasm_bindgen]
pub struct RoomInteraction {
    shared: SharedRef,
    canvas: web::HtmlCanvasElement,
    document: web::Document,
    listeners: Vec<dom::Listener>,
    frame_loop: Option<frame::FrameLoop>,
}

#[wasm_bindgen]
impl RoomInteraction {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: Option<String>) -> Result<RoomInteraction, JsValue> {
        Self::build(canvas_id.as_deref().unwrap_or(constants::DEFAULT_CANVAS_ID)).map_err(to_js)
    }

    /// Register one prop. `transform` is scale, position, rotation (9 floats);
    /// `bounds` is local min then max (6 floats) or empty for groups; `color`
    /// is rgb or empty.
    #[allow(clippy::too_many_arguments)]
    pub fn add_object(
        &mut self,
        name: String,
        parent: Option<String>,
        hover_tag: Option<String>,
        transform: &[f32],
        bounds: &[f32],
        color: &[f32],
        jump_factor: Option<f32>,
    ) -> Result<(), JsValue> {
        let transform = match (vec3(transform, 0), vec3(transform, 3), vec3(transform, 6)) {
            (Some(s), Some(p), Some(r)) => Transform::new(s, p, r),
            _ => return Err(JsValue::from_str("transform needs 9 floats")),
        };
        let spec = ObjectSpec {
            name,
            parent,
            hover_tag,
            transform,
            bounds: vec3(bounds, 0)
                .zip(vec3(bounds, 3))
                .map(|(min, max)| Bounds::new(min, max)),
            color: vec3(color, 0),
            jump_factor,
        };
        self.shared
            .borrow_mut()
            .interaction
            .registry_mut()
            .register(spec)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Capture rest poses and start listening for input.
    pub fn finish_loading(&mut self) -> Result<(), JsValue> {
        self.shared
            .borrow_mut()
            .interaction
            .finish_loading()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        self.listeners
            .extend(events::wire_pointer(&self.shared, &self.canvas));
        self.listeners
            .extend(events::wire_escape_close(&self.shared, &window));
        self.listeners
            .extend(events::wire_modal_controls(&self.shared, &self.document));
        self.frame_loop = Some(frame::start_loop(self.shared.clone()));
        log::info!("[loader] interaction live, {} listeners", self.listeners.len());
        Ok(())
    }

    pub fn set_camera(
        &mut self,
        eye: &[f32],
        target: &[f32],
        fovy_degrees: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) {
        let (Some(eye), Some(target)) = (vec3(eye, 0), vec3(target, 0)) else {
            return;
        };
        self.shared.borrow_mut().interaction.set_camera(Camera {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: fovy_degrees.to_radians(),
            znear,
            zfar,
        });
    }

    pub fn set_link(&mut self, fragment: &str, url: &str) {
        self.shared
            .borrow_mut()
            .interaction
            .links_mut()
            .set(fragment, url);
    }

    pub fn set_camera_input_callback(&mut self, callback: js_sys::Function) {
        self.shared
            .borrow_mut()
            .host
            .set_camera_input_callback(callback);
    }

    /// Live scale, position, rotation (9 floats).
    pub fn object_transform(&self, name: &str) -> Option<js_sys::Float32Array> {
        let shared = self.shared.borrow();
        let reg = shared.interaction.registry();
        let t = reg.get(reg.find(name)?)?.live;
        let mut out = [0.0f32; 9];
        out[0..3].copy_from_slice(&t.scale.to_array());
        out[3..6].copy_from_slice(&t.position.to_array());
        out[6..9].copy_from_slice(&t.rotation.to_array());
        Some(js_sys::Float32Array::from(&out[..]))
    }

    pub fn object_color(&self, name: &str) -> Option<js_sys::Float32Array> {
        let shared = self.shared.borrow();
        let reg = shared.interaction.registry();
        let c = reg.get(reg.find(name)?)?.color?;
        Some(js_sys::Float32Array::from(&c.to_array()[..]))
    }

    pub fn open_modal(&mut self, id: &str) {
        let Some(id) = parse_modal(id) else {
            log::warn!("[modal] unknown modal `{}`", id);
            return;
        };
        {
            let mut guard = self.shared.borrow_mut();
            let now = guard.now_ms();
            let Shared {
                interaction, host, ..
            } = &mut *guard;
            interaction.open_modal(id, now, host);
        }
        host::flush_camera_input(&self.shared);
    }

    pub fn close_modal(&mut self, id: &str) {
        if let Some(id) = parse_modal(id) {
            self.shared.borrow_mut().interaction.close_modal(id);
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.shared.borrow().interaction.is_modal_open()
    }

    /// Remove every listener and stop the frame loop.
    pub fn dispose(&mut self) {
        if let Some(fl) = self.frame_loop.take() {
            fl.stop();
        }
        let n = self.listeners.len();
        self.listeners.clear();
        log::info!("[loader] disposed, {} listeners removed", n);
    }
}
