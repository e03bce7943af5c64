use std::sync::atomic::{AtomicU64, Ordering};

use emberpane_protocol::{Rect, Transform};

use crate::canvas::Canvas;

/// Identity of a canvas view instance.
///
/// Scheduler events carry the originating view's id; handlers compare it
/// against their own to implement same-instance filtering. Ids are unique
/// for the lifetime of the process and never reused, so a rebuilt view is a
/// distinguishable new instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CanvasViewOptions {
    /// Icicle orientation: rows grow upward from the bottom edge.
    pub inverted: bool,
    /// Smallest allowed config-view width (zoom floor), in model units.
    pub min_width: f64,
    /// Height of one depth row in logical pixels.
    pub bar_height: f64,
    /// Spare rows reserved above the content (header/minimap gutter).
    pub depth_offset: f64,
    /// Optional model-to-view mapping applied to zoom-at-frame targets.
    pub config_space_transform: Option<Transform>,
}

impl Default for CanvasViewOptions {
    fn default() -> Self {
        Self {
            inverted: false,
            min_width: 0.0,
            bar_height: 1.0,
            depth_offset: 0.0,
            config_space_transform: None,
        }
    }
}

/// A config view rectangle over a config space, bound to one canvas.
///
/// Exactly one owner may mutate the rectangle, and only through the methods
/// below; cross-view synchronization goes through scheduler events. Every
/// mutation clamps the result into the config space, so the view can never
/// show a region the model does not have.
#[derive(Debug)]
pub struct CanvasView {
    id: ViewId,
    config_space: Rect,
    config_view: Rect,
    options: CanvasViewOptions,
}

impl CanvasView {
    pub fn new(config_space: Rect, canvas: &Canvas, options: CanvasViewOptions) -> Self {
        let mut view = Self {
            id: ViewId::next(),
            config_space,
            config_view: config_space,
            options,
        };
        view.reset_config_view(canvas);
        view
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn config_space(&self) -> Rect {
        self.config_space
    }

    pub fn config_view(&self) -> Rect {
        self.config_view
    }

    pub fn min_width(&self) -> f64 {
        self.options.min_width
    }

    pub fn bar_height(&self) -> f64 {
        self.options.bar_height
    }

    pub fn inverted(&self) -> bool {
        self.options.inverted
    }

    pub fn depth_offset(&self) -> f64 {
        self.options.depth_offset
    }

    pub fn config_space_transform(&self) -> Transform {
        self.options
            .config_space_transform
            .unwrap_or_else(Transform::identity)
    }

    /// Replace the config view, clamped into the config space.
    pub fn set_config_view(&mut self, rect: Rect) {
        self.config_view = rect.clamped_within(&self.config_space, self.options.min_width);
    }

    /// Apply an affine transform to the current config view, then clamp.
    pub fn transform_config_view(&mut self, transform: &Transform) {
        self.set_config_view(transform.apply_rect(&self.config_view));
    }

    /// Reset to the fit-to-content view: full config-space width, with as
    /// many rows visible as the canvas can show at `bar_height`.
    pub fn reset_config_view(&mut self, canvas: &Canvas) {
        let rows = if self.options.bar_height > 0.0 {
            (canvas.logical_height() / self.options.bar_height).floor()
        } else {
            self.config_space.h
        };
        let h = rows.max(1.0).min(self.config_space.h.max(1.0));
        self.config_view = Rect::new(
            self.config_space.x,
            self.config_space.y,
            self.config_space.w,
            h,
        )
        .clamped_within(&self.config_space, self.options.min_width);
    }
}
