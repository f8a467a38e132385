use crate::constants::MAX_FRAME_DT_SEC;
use crate::host;
use crate::{Shared, SharedRef};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop driving animations, modal transitions and the
/// per-frame hover pass. Stops on [`FrameLoop::stop`] or drop.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

pub fn start_loop(shared: SharedRef) -> FrameLoop {
    let running = Rc::new(Cell::new(true));
    let handle = Rc::new(Cell::new(None::<i32>));
    let tick: TickSlot = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let handle_tick = handle.clone();
    let mut last = Instant::now();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running_tick.get() {
            return;
        }
        let now = Instant::now();
        let dt = (now - last).as_secs_f32().min(MAX_FRAME_DT_SEC);
        last = now;
        {
            let mut guard = shared.borrow_mut();
            let Shared {
                interaction, host, ..
            } = &mut *guard;
            interaction.frame(dt, host);
        }
        host::flush_camera_input(&shared);
        handle_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    handle.set(request_frame(&tick));

    FrameLoop {
        running,
        handle,
        tick,
    }
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let window = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

impl FrameLoop {
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(h), Some(w)) = (self.handle.take(), web::window()) {
            _ = w.cancel_animation_frame(h);
        }
        // breaks the closure <-> slot cycle
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
