use emberpane_protocol::{Point, Rect, RenderCommand, ThemeToken};

use crate::canvas::Canvas;
use crate::model::FrameGraph;
use crate::render::{Renderer, RendererError, RendererOptions};
use crate::view::CanvasView;

const ROW_HEIGHT: f64 = 4.0;
const CELL_WIDTH: f64 = 4.0;
const HANDLE_WIDTH: f64 = 2.0;

/// Overview backend for a timeline pane: a density heatmap of the whole
/// graph with a viewport indicator for the pane's current config view.
///
/// The density content always spans the full time range — the timeline's
/// config view only moves the indicator, which is how a synchronized
/// timeline pane shows where its companion is zoomed.
pub struct TimelineRenderer;

impl TimelineRenderer {
    pub fn factory(
        _graph: &FrameGraph,
        _options: &RendererOptions,
    ) -> Result<Box<dyn Renderer>, RendererError> {
        Ok(Box::new(Self))
    }
}

impl Renderer for TimelineRenderer {
    fn name(&self) -> &'static str {
        "timeline"
    }

    fn render(
        &mut self,
        graph: &FrameGraph,
        view: &CanvasView,
        canvas: &Canvas,
    ) -> Vec<RenderCommand> {
        let space = view.config_space();
        if space.w <= 0.0 {
            return Vec::new();
        }

        let width = canvas.logical_width();
        let height = canvas.logical_height();
        let cols = (width / CELL_WIDTH).ceil().max(1.0) as usize;
        let max_rows = ((height / ROW_HEIGHT).floor() as usize).max(1);
        let col_duration = space.w / cols as f64;

        let mut commands = Vec::with_capacity(cols + 8);
        commands.push(RenderCommand::BeginGroup {
            id: "timeline".into(),
            label: None,
        });
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, 0.0, width, height),
            color: ThemeToken::TimelineBackground,
            border_color: None,
            label: None,
            frame_id: None,
        });

        // Bucket frames into a depth x time grid; cell value = overlap count.
        let mut grid = vec![0u16; cols * max_rows];
        for frame in &graph.frames {
            let row = frame.depth as usize;
            if row >= max_rows {
                continue;
            }
            let col_start = (((frame.start - space.x) / col_duration) as usize).min(cols);
            let col_end = (((frame.end - space.x) / col_duration).ceil() as usize).min(cols);
            for c in col_start..col_end {
                grid[row * cols + c] = grid[row * cols + c].saturating_add(1);
            }
        }

        // Merge horizontal runs of occupied cells into single rects.
        for row in 0..max_rows {
            let y = row as f64 * ROW_HEIGHT;
            let mut c = 0;
            while c < cols {
                if grid[row * cols + c] == 0 {
                    c += 1;
                    continue;
                }
                let run_start = c;
                while c < cols && grid[row * cols + c] > 0 {
                    c += 1;
                }
                commands.push(RenderCommand::DrawRect {
                    rect: Rect::new(
                        run_start as f64 * CELL_WIDTH,
                        y,
                        (c - run_start) as f64 * CELL_WIDTH,
                        ROW_HEIGHT,
                    ),
                    color: ThemeToken::TimelineDensity,
                    border_color: None,
                    label: None,
                    frame_id: None,
                });
            }
        }

        // Viewport indicator from this pane's own (synchronized) view.
        let cv = view.config_view();
        let frac_start = ((cv.x - space.x) / space.w).clamp(0.0, 1.0);
        let frac_end = ((cv.right() - space.x) / space.w).clamp(0.0, 1.0);
        let vp_x = frac_start * width;
        let vp_w = (frac_end - frac_start) * width;

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(vp_x, 0.0, vp_w, height),
            color: ThemeToken::TimelineViewport,
            border_color: Some(ThemeToken::Border),
            label: None,
            frame_id: None,
        });
        commands.push(RenderCommand::DrawLine {
            from: Point::new(vp_x, 0.0),
            to: Point::new(vp_x, height),
            color: ThemeToken::TimelineHandle,
            width: HANDLE_WIDTH,
        });
        commands.push(RenderCommand::DrawLine {
            from: Point::new(vp_x + vp_w, 0.0),
            to: Point::new(vp_x + vp_w, height),
            color: ThemeToken::TimelineHandle,
            width: HANDLE_WIDTH,
        });

        commands.push(RenderCommand::EndGroup);
        commands
    }
}
