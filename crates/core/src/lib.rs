//! Core of emberpane: the frame-graph model, canvas views over it, and the
//! coordination machinery (scheduler + canvas pool) that keeps multiple
//! views synchronized without sharing mutable state.
//!
//! The flow is: a host attaches a [`pane::FlamePane`] to a [`canvas::Canvas`],
//! input is translated into [`scheduler::ViewEvent`]s, each pane's handlers
//! mutate only their own [`view::CanvasView`] and request a coalesced redraw
//! through the [`pool::CanvasPool`].

pub mod canvas;
pub mod model;
pub mod pane;
pub mod pool;
pub mod render;
pub mod scheduler;
pub mod view;
pub mod zoom;

pub use canvas::Canvas;
pub use model::{FrameBounds, FrameGraph, FrameNode};
pub use pane::{FlamePane, PaneTheme};
pub use pool::CanvasPool;
pub use scheduler::{EventKind, Scheduler, SubscriptionToken, ViewEvent};
pub use view::{CanvasView, CanvasViewOptions, ViewId};
pub use zoom::ZoomStrategy;
