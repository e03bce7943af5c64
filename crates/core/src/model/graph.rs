use emberpane_protocol::{Label, Rect};
use serde::{Deserialize, Serialize};

/// A single frame span in the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameNode {
    /// Unique identifier within this graph.
    pub id: u64,
    /// Display name (function, component, etc.).
    pub name: Label,
    /// Start position in model units (e.g. microseconds or sample counts).
    pub start: f64,
    /// End position in model units.
    pub end: f64,
    /// Stack depth (0 = top-level).
    pub depth: u32,
    /// Id of the parent frame, if any.
    pub parent: Option<u64>,
}

impl FrameNode {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn bounds(&self) -> FrameBounds {
        FrameBounds {
            start: self.start,
            end: self.end,
            depth: self.depth,
        }
    }
}

/// The position of a frame in config space — the payload of a zoom-at-frame
/// event. Detached from the graph so events stay transient values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameBounds {
    pub start: f64,
    pub end: f64,
    pub depth: u32,
}

impl FrameBounds {
    /// The one-row-tall config-space rect covering this frame.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.start, f64::from(self.depth), self.end - self.start, 1.0)
    }
}

/// A hierarchical frame graph: the model a canvas view renders.
///
/// Read-only from the view machinery's perspective — views own a rectangle
/// over this space, never the space itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameGraph {
    pub name: Option<String>,
    pub frames: Vec<FrameNode>,
    pub start_time: f64,
    pub end_time: f64,
    /// Icicle orientation: depth grows upward instead of downward.
    pub inverted: bool,
}

impl FrameGraph {
    /// Build a graph from frames, deriving the time extent.
    pub fn from_frames(name: Option<String>, frames: Vec<FrameNode>) -> Self {
        let start_time = frames.iter().map(|f| f.start).fold(f64::INFINITY, f64::min);
        let end_time = frames
            .iter()
            .map(|f| f.end)
            .fold(f64::NEG_INFINITY, f64::max);
        Self {
            name,
            frames,
            start_time: if start_time.is_finite() { start_time } else { 0.0 },
            end_time: if end_time.is_finite() { end_time } else { 0.0 },
            inverted: false,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn max_depth(&self) -> u32 {
        self.frames.iter().map(|f| f.depth).max().unwrap_or(0)
    }

    /// The smallest positive frame duration — used as the zoom floor so a
    /// view can never zoom past the point where every frame is sub-pixel.
    pub fn min_frame_duration(&self) -> f64 {
        self.frames
            .iter()
            .map(FrameNode::duration)
            .filter(|d| *d > 0.0)
            .fold(f64::INFINITY, f64::min)
            .min(self.duration())
            .max(0.0)
    }

    pub fn frame(&self, id: u64) -> Option<&FrameNode> {
        self.frames.iter().find(|f| f.id == id)
    }

    /// The full logical extent a config view is clamped into. X covers the
    /// time range, Y covers depth rows plus `depth_offset` spare rows.
    pub fn config_space(&self, depth_offset: f64) -> Rect {
        let rows = if self.frames.is_empty() {
            0.0
        } else {
            f64::from(self.max_depth()) + 1.0
        };
        Rect::new(self.start_time, 0.0, self.duration(), rows + depth_offset)
    }
}
