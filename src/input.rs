use glam::Vec2;
use std::time::Duration;
use web_sys as web;

/// Keyboard navigation through the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    Close,
    OpenAll,
}

#[inline]
pub fn nav_for_key(key: &str) -> Option<NavCommand> {
    match key {
        "ArrowRight" | "PageDown" | " " => Some(NavCommand::Next),
        "ArrowLeft" | "PageUp" => Some(NavCommand::Previous),
        "Home" => Some(NavCommand::Close),
        "End" => Some(NavCommand::OpenAll),
        _ => None,
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width() as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height() as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Canvas pixels to normalized device coordinates (`-1..1`, y up).
#[inline]
pub fn px_to_ndc(px: Vec2, width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Vec2::new(px.x / w * 2.0 - 1.0, 1.0 - px.y / h * 2.0)
}

#[inline]
pub fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Pages whose hover flag changes when the hovered page goes from `prev` to
/// `next`: `(left, entered)`.
#[inline]
pub fn hover_change(prev: Option<usize>, next: Option<usize>) -> (Option<usize>, Option<usize>) {
    if prev == next {
        (None, None)
    } else {
        (prev, next)
    }
}

/// `setTimeout` delay in whole milliseconds, saturating at `i32::MAX`.
#[inline]
pub fn timeout_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}
