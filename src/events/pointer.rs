use crate::dom::{self, Listener};
use crate::host;
use crate::input;
use crate::{Shared, SharedRef};
use web_sys as web;

/// Pointer, touch and click handlers on the canvas.
pub fn wire_pointer(shared: &SharedRef, canvas: &web::HtmlCanvasElement) -> Vec<Listener> {
    let target: &web::EventTarget = canvas.as_ref();
    let mut out = Vec::new();

    let s = shared.clone();
    let c = canvas.clone();
    out.extend(dom::listen(target, "pointermove", move |ev: web::PointerEvent| {
        let (_, ndc) = input::pointer_position(&ev, &c);
        s.borrow_mut().interaction.pointer_move(ndc);
    }));

    let s = shared.clone();
    out.extend(dom::listen(target, "pointerleave", move |ev: web::PointerEvent| {
        if ev.pointer_type() == "mouse" {
            s.borrow_mut().interaction.pointer_leave();
        }
    }));

    let s = shared.clone();
    let c = canvas.clone();
    out.extend(dom::listen(target, "pointerdown", move |ev: web::PointerEvent| {
        let (px, ndc) = input::pointer_position(&ev, &c);
        s.borrow_mut().interaction.pointer_down(px, ndc);
    }));

    let s = shared.clone();
    let c = canvas.clone();
    out.extend(dom::listen(target, "click", move |ev: web::MouseEvent| {
        let (px, ndc) = input::pointer_position(&ev, &c);
        {
            let mut guard = s.borrow_mut();
            let now = guard.now_ms();
            let Shared {
                interaction, host, ..
            } = &mut *guard;
            interaction.click(px, ndc, now, host);
        }
        host::flush_camera_input(&s);
    }));

    let s = shared.clone();
    let c = canvas.clone();
    out.extend(dom::listen(target, "touchstart", move |ev: web::TouchEvent| {
        if let Some((px, ndc)) = input::touch_position(&ev.touches(), &c) {
            s.borrow_mut().interaction.touch_start(px, ndc);
        }
    }));

    let s = shared.clone();
    let c = canvas.clone();
    out.extend(dom::listen(target, "touchend", move |ev: web::TouchEvent| {
        let Some((px, ndc)) = input::touch_position(&ev.changed_touches(), &c) else {
            return;
        };
        {
            let mut guard = s.borrow_mut();
            let now = guard.now_ms();
            let Shared {
                interaction, host, ..
            } = &mut *guard;
            interaction.touch_end(px, ndc, now, host);
        }
        host::flush_camera_input(&s);
    }));

    out
}
