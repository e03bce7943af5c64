use std::io::stdout;
use std::rc::Rc;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use emberpane_core::model::FrameGraph;
use emberpane_core::pane::{DependencyChange, FlamePane, PaneConfig, PaneTheme};
use emberpane_core::render::TimelineRenderer;
use emberpane_core::{Canvas, CanvasPool, Scheduler, ViewEvent, ZoomStrategy};
use emberpane_protocol::{RenderCommand, Transform};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};

use crate::renderer::draw_commands;

const TIMELINE_ROWS: u16 = 4;

struct App {
    scheduler: Rc<Scheduler>,
    pool: Rc<CanvasPool>,
    graph: Rc<FrameGraph>,
    flame: FlamePane,
    timeline: FlamePane,
    /// Index into `graph.frames` cycled with Tab; zoom targets this frame.
    selected: usize,
    flame_commands: Vec<RenderCommand>,
    timeline_commands: Vec<RenderCommand>,
}

impl App {
    fn new(graph: FrameGraph, term_width: u16, term_height: u16) -> Self {
        let scheduler = Rc::new(Scheduler::new());
        let pool = Rc::new(CanvasPool::new());
        let graph = Rc::new(graph);

        let mut flame = FlamePane::new(
            Rc::clone(&scheduler),
            Rc::clone(&pool),
            Rc::clone(&graph),
            PaneConfig {
                // One terminal row per depth level.
                theme: PaneTheme {
                    bar_height: 1.0,
                    depth_offset: 0.0,
                },
                ..PaneConfig::default()
            },
        );
        let mut timeline = FlamePane::new(
            Rc::clone(&scheduler),
            Rc::clone(&pool),
            Rc::clone(&graph),
            PaneConfig {
                theme: PaneTheme {
                    bar_height: f64::from(TIMELINE_ROWS),
                    depth_offset: 0.0,
                },
                factories: vec![TimelineRenderer::factory],
                ..PaneConfig::default()
            },
        );

        let (flame_canvas, timeline_canvas) = canvases(term_width, term_height);
        flame.attach(flame_canvas);
        timeline.attach(timeline_canvas);
        pool.request_draw();

        Self {
            scheduler,
            pool,
            graph,
            flame,
            timeline,
            selected: 0,
            flame_commands: Vec::new(),
            timeline_commands: Vec::new(),
        }
    }

    fn resize(&mut self, term_width: u16, term_height: u16) {
        let (flame_canvas, timeline_canvas) = canvases(term_width, term_height);
        self.flame.dependencies_changed(DependencyChange {
            canvas: Some(flame_canvas),
            ..DependencyChange::default()
        });
        self.timeline.dependencies_changed(DependencyChange {
            canvas: Some(timeline_canvas),
            ..DependencyChange::default()
        });
        self.pool.request_draw();
    }

    /// Apply a pan/zoom transform to the flame pane and mirror the shared
    /// axis onto the timeline so its viewport indicator follows.
    fn transform_flame(&mut self, transform: Transform) {
        let Some(source) = self.flame.view_id() else {
            return;
        };
        self.scheduler
            .dispatch(ViewEvent::TransformConfigView { transform, source });
        self.sync_timeline();
    }

    fn sync_timeline(&mut self) {
        let (Some(rect), Some(source)) = (self.flame.config_view(), self.timeline.view_id())
        else {
            return;
        };
        self.scheduler
            .dispatch(ViewEvent::SetConfigView { rect, source });
    }

    fn zoom_selected(&mut self, strategy: ZoomStrategy) {
        let Some(frame) = self.graph.frames.get(self.selected) else {
            return;
        };
        self.scheduler.dispatch(ViewEvent::ZoomAtFrame {
            frame: frame.bounds(),
            strategy,
        });
        self.sync_timeline();
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        let view_width = self.flame.config_view().map_or(0.0, |r| r.w);
        let pan = view_width * 0.1;

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Left | KeyCode::Char('h') => {
                self.transform_flame(Transform::translation(-pan, 0.0));
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.transform_flame(Transform::translation(pan, 0.0));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.transform_flame(Transform::translation(0.0, -1.0));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.transform_flame(Transform::translation(0.0, 1.0));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_about_center(0.5),
            KeyCode::Char('-') => self.zoom_about_center(2.0),
            KeyCode::Char('0') => {
                self.scheduler.dispatch(ViewEvent::ResetZoom);
            }
            KeyCode::Tab => {
                if !self.graph.frames.is_empty() {
                    self.selected = (self.selected + 1) % self.graph.frames.len();
                    self.pool.request_draw();
                }
            }
            KeyCode::Enter => self.zoom_selected(ZoomStrategy::Min),
            KeyCode::Char('x') => self.zoom_selected(ZoomStrategy::Exact),
            _ => {}
        }
        true
    }

    fn zoom_about_center(&mut self, factor: f64) {
        let Some(view) = self.flame.config_view() else {
            return;
        };
        let cx = view.x + view.w / 2.0;
        self.transform_flame(Transform::scale_about(factor, 1.0, cx, 0.0));
    }

    fn handle_mouse(&mut self, kind: MouseEventKind) {
        let view_width = self.flame.config_view().map_or(0.0, |r| r.w);
        match kind {
            MouseEventKind::ScrollUp => self.zoom_about_center(0.5),
            MouseEventKind::ScrollDown => self.zoom_about_center(2.0),
            MouseEventKind::ScrollLeft => {
                self.transform_flame(Transform::translation(-view_width * 0.1, 0.0));
            }
            MouseEventKind::ScrollRight => {
                self.transform_flame(Transform::translation(view_width * 0.1, 0.0));
            }
            _ => {}
        }
    }

    fn repaint_if_due(&mut self) {
        if self.pool.begin_frame() {
            self.flame_commands = self.flame.paint();
            self.timeline_commands = self.timeline.paint();
        }
    }

    fn status_line(&self) -> String {
        if let Some(notice) = self.flame.notice() {
            return format!(" {notice} — press q to quit ");
        }
        let zoom = self
            .flame
            .config_view()
            .map_or(100.0, |r| 100.0 * self.graph.duration() / r.w.max(1e-9));
        let selected = self
            .graph
            .frames
            .get(self.selected)
            .map_or("-", |f| f.name.as_str());
        format!(
            " {} frames | zoom {:.0}% | sel: {} | ←→ pan  +/- zoom  Tab sel  ⏎ zoom-to  x exact  0 reset  q quit ",
            self.graph.frames.len(),
            zoom,
            selected,
        )
    }
}

fn canvases(term_width: u16, term_height: u16) -> (Canvas, Canvas) {
    // Row 0: header. Rows 1..=TIMELINE_ROWS: timeline. Last row: status.
    let flame_rows = term_height
        .saturating_sub(TIMELINE_ROWS)
        .saturating_sub(2);
    (
        Canvas::new(u32::from(term_width), u32::from(flame_rows), 1.0),
        Canvas::new(u32::from(term_width), u32::from(TIMELINE_ROWS), 1.0),
    )
}

pub fn run(graph: FrameGraph) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, event::EnableMouseCapture)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(graph, size.width, size.height);

    loop {
        app.repaint_if_due();

        terminal.draw(|frame| {
            let area = frame.area();
            let title = app
                .graph
                .name
                .clone()
                .unwrap_or_else(|| "emberpane".to_owned());

            let header_area = Rect::new(0, 0, area.width, 1);
            frame.render_widget(
                Block::default()
                    .title(format!(" {title} "))
                    .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                header_area,
            );

            let timeline_area = Rect::new(
                0,
                1,
                area.width,
                TIMELINE_ROWS.min(area.height.saturating_sub(1)),
            );
            draw_commands(frame, timeline_area, &app.timeline_commands);

            let flame_top = 1 + TIMELINE_ROWS;
            if area.height > flame_top + 1 {
                let flame_area = Rect::new(
                    0,
                    flame_top,
                    area.width,
                    area.height - flame_top - 1,
                );
                draw_commands(frame, flame_area, &app.flame_commands);
            }

            if area.height > 1 {
                let status_area = Rect::new(0, area.height - 1, area.width, 1);
                frame.render_widget(
                    Block::default()
                        .title(app.status_line())
                        .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                    status_area,
                );
            }
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !app.handle_key(key.code) {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse.kind),
                Event::Resize(w, h) => app.resize(w, h),
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
