pub mod graph;
pub mod loader;

pub use graph::{FrameBounds, FrameGraph, FrameNode};
pub use loader::{LoadError, parse_auto, parse_collapsed, parse_json};
