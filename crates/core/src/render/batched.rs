use emberpane_protocol::{Rect, RenderCommand, ThemeToken};

use crate::canvas::Canvas;
use crate::model::FrameGraph;
use crate::render::{Renderer, RendererError, RendererOptions, color_for_depth};
use crate::view::CanvasView;

/// Frames per construction before the batched backend refuses; the per-row
/// index arrays are preallocated against this budget.
const QUAD_BUDGET: usize = 1 << 20;

/// Width in logical pixels below which neighboring frames collapse into a
/// single merged run.
const MERGE_THRESHOLD: f64 = 0.5;

/// Preferred backend: frames are pre-sorted into per-depth rows so a paint
/// pass only touches visible rows, binary-searches into the visible time
/// range, and merges sub-pixel neighbors into single rects.
///
/// Construction fails past [`QUAD_BUDGET`] frames; the scan backend takes
/// over in that case.
pub struct BatchedRenderer {
    options: RendererOptions,
    /// Frame indices grouped by depth, sorted by start within each row.
    rows: Vec<Vec<usize>>,
}

impl BatchedRenderer {
    pub fn factory(
        graph: &FrameGraph,
        options: &RendererOptions,
    ) -> Result<Box<dyn Renderer>, RendererError> {
        Self::new(graph, options).map(|r| Box::new(r) as Box<dyn Renderer>)
    }

    pub fn new(graph: &FrameGraph, options: &RendererOptions) -> Result<Self, RendererError> {
        if graph.frames.len() > QUAD_BUDGET {
            return Err(RendererError::CapacityExceeded {
                frames: graph.frames.len(),
                budget: QUAD_BUDGET,
            });
        }

        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); graph.max_depth() as usize + 1];
        for (i, frame) in graph.frames.iter().enumerate() {
            rows[frame.depth as usize].push(i);
        }
        for row in &mut rows {
            row.sort_by(|&a, &b| {
                graph.frames[a]
                    .start
                    .total_cmp(&graph.frames[b].start)
            });
        }

        Ok(Self {
            options: *options,
            rows,
        })
    }
}

impl Renderer for BatchedRenderer {
    fn name(&self) -> &'static str {
        "batched"
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
        let logical_height = canvas.logical_height();

        let mut commands = Vec::new();
        commands.push(RenderCommand::BeginGroup {
            id: "flame".into(),
            label: graph.name.as_deref().map(Into::into),
        });

        for (depth, row) in self.rows.iter().enumerate() {
            let row_y = depth as f64 + view.depth_offset();
            if row_y + 1.0 < cv.y || row_y > cv.bottom() {
                continue;
            }
            let y = if view.inverted() {
                logical_height - (row_y - cv.y + 1.0) * row_height
            } else {
                (row_y - cv.y) * row_height
            };

            // First frame that could still overlap the left edge.
            let first = row.partition_point(|&i| graph.frames[i].end < cv.x);

            // Pending merged run of sub-pixel frames, in pixel coords.
            let mut run: Option<(f64, f64)> = None;

            for &i in &row[first..] {
                let frame = &graph.frames[i];
                if frame.start > cv.right() {
                    break;
                }

                let x = (frame.start - cv.x) * px_per_unit;
                let w = frame.duration() * px_per_unit;

                if w < MERGE_THRESHOLD {
                    run = match run {
                        Some((rx, rr)) if x - rr < MERGE_THRESHOLD => Some((rx, rr.max(x + w))),
                        Some((rx, rr)) => {
                            push_run(&mut commands, rx, rr, y, row_height);
                            Some((x, x + w))
                        }
                        None => Some((x, x + w)),
                    };
                    continue;
                }

                if let Some((rx, rr)) = run.take() {
                    push_run(&mut commands, rx, rr, y, row_height);
                }

                commands.push(RenderCommand::DrawRect {
                    rect: Rect::new(x, y, w, row_height - 1.0),
                    color: color_for_depth(frame.depth),
                    border_color: self.options.draw_border.then_some(ThemeToken::Border),
                    label: Some(frame.name.clone()),
                    frame_id: Some(frame.id),
                });
            }

            if let Some((rx, rr)) = run.take() {
                push_run(&mut commands, rx, rr, y, row_height);
            }
        }

        commands.push(RenderCommand::EndGroup);
        commands
    }
}

/// Emit a merged run of sub-pixel frames as one neutral rect, at least one
/// pixel wide so dense regions stay visible.
fn push_run(commands: &mut Vec<RenderCommand>, x0: f64, x1: f64, y: f64, row_height: f64) {
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(x0, y, (x1 - x0).max(1.0), row_height - 1.0),
        color: ThemeToken::FlameNeutral,
        border_color: None,
        label: None,
        frame_id: None,
    });
}
