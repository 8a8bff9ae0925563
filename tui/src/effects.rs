//! Animation effects for bubbles and overlays.

use ratatui::layout::Rect;

/// Shrink `base` toward its center as `progress` runs 0 → 1, for the bubble
/// pop during the clear ritual.
#[must_use]
pub fn pop_rect(base: Rect, progress: f32) -> Rect {
    let scale = 1.0 - ease_out_cubic(progress);
    scale_rect(base, scale)
}

fn scale_rect(base: Rect, scale: f32) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let width = (f32::from(base.width) * scale).round() as u16;
    let height = (f32::from(base.height) * scale).round() as u16;
    let x = base.x + (base.width.saturating_sub(width) / 2);
    let y = base.y + (base.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

pub(crate) fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
