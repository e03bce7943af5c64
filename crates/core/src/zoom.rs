use emberpane_protocol::Rect;
use serde::{Deserialize, Serialize};

/// Policy for fitting a frame into a new config view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomStrategy {
    /// Adjust the current view minimally so the frame becomes visible,
    /// honoring the zoom floor.
    Min,
    /// Jump to the exact one-row-tall rect covering the frame.
    Exact,
}

/// Compute the config view that frames `frame` under `strategy`.
///
/// `frame` is the one-row config-space rect of the target
/// (`FrameBounds::to_rect`). The result is unclamped — callers map it
/// through the view's config-space transform and `set_config_view` clamps.
pub fn config_view_for_frame(
    strategy: ZoomStrategy,
    current: Rect,
    frame: Rect,
    min_width: f64,
) -> Rect {
    match strategy {
        ZoomStrategy::Exact => frame,
        ZoomStrategy::Min => {
            if current.contains_rect(&frame) {
                return current;
            }

            let w = current.w.max(frame.w).max(min_width);
            let h = current.h.max(frame.h);

            // Shift the smallest distance that brings the frame inside.
            let x = if frame.x < current.x {
                frame.x
            } else if frame.right() > current.x + w {
                frame.right() - w
            } else {
                current.x
            };
            let y = if frame.y < current.y {
                frame.y
            } else if frame.bottom() > current.y + h {
                frame.bottom() - h
            } else {
                current.y
            };

            Rect::new(x, y, w, h)
        }
    }
}
