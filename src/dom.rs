use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// An event listener that unregisters itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Subscribe `handler` to `kind` events on `target`. Events that are not of
/// type `E` are ignored.
pub fn listen<E>(
    target: &web::EventTarget,
    kind: &'static str,
    mut handler: impl FnMut(E) + 'static,
) -> Option<Listener>
where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        Ok(()) => Some(Listener {
            target: target.clone(),
            kind,
            closure,
        }),
        Err(e) => {
            log::warn!("[dom] could not listen for {}: {:?}", kind, e);
            None
        }
    }
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}
