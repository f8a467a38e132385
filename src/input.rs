use glam::Vec2;
use room_core::px_to_ndc;
use web_sys as web;

/// Client coordinates to CSS pixels inside the canvas, plus the matching NDC.
#[inline]
pub fn client_to_canvas(client_x: f64, client_y: f64, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let px = Vec2::new(
        (client_x - rect.left()) as f32,
        (client_y - rect.top()) as f32,
    );
    let ndc = px_to_ndc(px, rect.width() as f32, rect.height() as f32);
    (px, ndc)
}

#[inline]
pub fn pointer_position(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    client_to_canvas(ev.client_x() as f64, ev.client_y() as f64, canvas)
}

/// First touch of `list`, if any.
#[inline]
pub fn touch_position(list: &web::TouchList, canvas: &web::HtmlCanvasElement) -> Option<(Vec2, Vec2)> {
    let touch = list.get(0)?;
    Some(client_to_canvas(
        touch.client_x() as f64,
        touch.client_y() as f64,
        canvas,
    ))
}
