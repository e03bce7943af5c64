//! Renderer backends and the ordered selection policy.
//!
//! A backend turns `(graph, view, canvas)` into a stateless render-command
//! stream. Backends are tried in preference order at pane attach; the first
//! one whose construction succeeds wins. All failing is not an error — it is
//! the explicit no-renderer state the pane degrades into.

pub mod batched;
pub mod scan;
pub mod timeline;

use emberpane_protocol::{RenderCommand, ThemeToken};
use thiserror::Error;

use crate::canvas::Canvas;
use crate::model::FrameGraph;
use crate::view::CanvasView;

pub use batched::BatchedRenderer;
pub use scan::ScanRenderer;
pub use timeline::TimelineRenderer;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("frame count {frames} exceeds the batch budget of {budget}")]
    CapacityExceeded { frames: usize, budget: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct RendererOptions {
    pub draw_border: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self { draw_border: true }
    }
}

pub trait Renderer {
    fn name(&self) -> &'static str;

    fn render(
        &mut self,
        graph: &FrameGraph,
        view: &CanvasView,
        canvas: &Canvas,
    ) -> Vec<RenderCommand>;
}

/// A backend constructor. Must be side-effect-free on failure.
pub type RendererFactory =
    fn(&FrameGraph, &RendererOptions) -> Result<Box<dyn Renderer>, RendererError>;

/// Try `factories` in order and return the first backend that initializes.
/// Returns `None` when every factory fails — callers surface that as a
/// degraded state, not a propagated error.
pub fn initialize_renderer(
    factories: &[RendererFactory],
    graph: &FrameGraph,
    options: &RendererOptions,
) -> Option<Box<dyn Renderer>> {
    for factory in factories {
        match factory(graph, options) {
            Ok(renderer) => {
                tracing::debug!(backend = renderer.name(), "selected renderer backend");
                return Some(renderer);
            }
            Err(err) => {
                tracing::debug!(error = %err, "renderer backend unavailable, trying next");
            }
        }
    }
    None
}

/// The default backend preference order: batched first, scan fallback.
pub fn default_factories() -> Vec<RendererFactory> {
    vec![BatchedRenderer::factory, ScanRenderer::factory]
}

pub(crate) fn color_for_depth(depth: u32) -> ThemeToken {
    match depth % 4 {
        0 => ThemeToken::FlameHot,
        1 => ThemeToken::FlameWarm,
        2 => ThemeToken::FlameCold,
        _ => ThemeToken::FlameNeutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FrameNode;

    fn graph() -> FrameGraph {
        FrameGraph::from_frames(
            None,
            vec![FrameNode {
                id: 0,
                name: "main".into(),
                start: 0.0,
                end: 100.0,
                depth: 0,
                parent: None,
            }],
        )
    }

    fn failing(
        _graph: &FrameGraph,
        _options: &RendererOptions,
    ) -> Result<Box<dyn Renderer>, RendererError> {
        Err(RendererError::CapacityExceeded {
            frames: 1,
            budget: 0,
        })
    }

    #[test]
    fn first_successful_factory_wins() {
        let factories: Vec<RendererFactory> = vec![failing, ScanRenderer::factory];
        let renderer = initialize_renderer(&factories, &graph(), &RendererOptions::default());
        assert_eq!(renderer.map(|r| r.name()), Some("scan"));
    }

    #[test]
    fn all_failing_factories_yield_none() {
        let factories: Vec<RendererFactory> = vec![failing, failing];
        assert!(initialize_renderer(&factories, &graph(), &RendererOptions::default()).is_none());
    }

    #[test]
    fn default_order_prefers_batched() {
        let renderer =
            initialize_renderer(&default_factories(), &graph(), &RendererOptions::default());
        assert_eq!(renderer.map(|r| r.name()), Some("batched"));
    }
}
