use emberpane_protocol::{Rect, RenderCommand, ThemeToken};

use crate::canvas::Canvas;
use crate::model::FrameGraph;
use crate::render::{Renderer, RendererError, RendererOptions, color_for_depth};
use crate::view::CanvasView;

/// Fallback backend: a linear cull-and-emit walk over every frame.
///
/// No preprocessing, no budget — always constructible. O(frames) per paint,
/// which is fine for the graph sizes the batched backend rejects anyway.
pub struct ScanRenderer {
    options: RendererOptions,
}

impl ScanRenderer {
    pub fn factory(
        _graph: &FrameGraph,
        options: &RendererOptions,
    ) -> Result<Box<dyn Renderer>, RendererError> {
        Ok(Box::new(Self { options: *options }))
    }
}

impl Renderer for ScanRenderer {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn render(
        &mut self,
        graph: &FrameGraph,
        view: &CanvasView,
        canvas: &Canvas,
    ) -> Vec<RenderCommand> {
        let cv = view.config_view();
        if cv.w <= 0.0 || cv.h <= 0.0 {
            return Vec::new();
        }

        let px_per_unit = canvas.logical_width() / cv.w;
        let row_height = canvas.logical_height() / cv.h;

        let mut commands = Vec::with_capacity(graph.frames.len() + 2);
        commands.push(RenderCommand::BeginGroup {
            id: "flame".into(),
            label: graph.name.as_deref().map(Into::into),
        });

        for frame in &graph.frames {
            // Cull in config space.
            if frame.end < cv.x || frame.start > cv.right() {
                continue;
            }
            let row = f64::from(frame.depth) + view.depth_offset();
            if row + 1.0 < cv.y || row > cv.bottom() {
                continue;
            }

            let w = frame.duration() * px_per_unit;
            if w < 0.5 {
                continue;
            }

            let x = (frame.start - cv.x) * px_per_unit;
            let y = if view.inverted() {
                canvas.logical_height() - (row - cv.y + 1.0) * row_height
            } else {
                (row - cv.y) * row_height
            };

            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x, y, w, row_height - 1.0),
                color: color_for_depth(frame.depth),
                border_color: self.options.draw_border.then_some(ThemeToken::Border),
                label: Some(frame.name.clone()),
                frame_id: Some(frame.id),
            });
        }

        commands.push(RenderCommand::EndGroup);
        commands
    }
}
