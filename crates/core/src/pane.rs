use std::cell::RefCell;
use std::rc::Rc;

use emberpane_protocol::{Rect, RenderCommand, Transform};

use crate::canvas::Canvas;
use crate::model::FrameGraph;
use crate::pool::CanvasPool;
use crate::render::{Renderer, RendererFactory, RendererOptions, initialize_renderer};
use crate::scheduler::{EventKind, Scheduler, SubscriptionToken, ViewEvent};
use crate::view::{CanvasView, CanvasViewOptions, ViewId};
use crate::zoom::config_view_for_frame;

/// Theme values the view-model consumes.
#[derive(Debug, Clone, Copy)]
pub struct PaneTheme {
    /// Height of one depth row in logical pixels.
    pub bar_height: f64,
    /// Spare rows reserved above the content.
    pub depth_offset: f64,
}

impl Default for PaneTheme {
    fn default() -> Self {
        Self {
            bar_height: 20.0,
            depth_offset: 0.0,
        }
    }
}

/// Static configuration for a pane: backend preference order and the
/// optional model-to-view coordinate mapping.
pub struct PaneConfig {
    pub theme: PaneTheme,
    pub factories: Vec<RendererFactory>,
    pub renderer_options: RendererOptions,
    pub config_space_transform: Option<Transform>,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self {
            theme: PaneTheme::default(),
            factories: crate::render::default_factories(),
            renderer_options: RendererOptions::default(),
            config_space_transform: None,
        }
    }
}

/// Batched dependency update; `None` fields keep the current value.
#[derive(Default)]
pub struct DependencyChange {
    pub graph: Option<Rc<FrameGraph>>,
    pub canvas: Option<Canvas>,
    pub theme: Option<PaneTheme>,
}

/// A flame-graph pane: one canvas view over one model, coordinated with
/// companion panes through the shared scheduler.
///
/// Framework-free lifecycle: the host calls [`attach`](Self::attach) when a
/// canvas exists, [`detach`](Self::detach) on teardown, and
/// [`dependencies_changed`](Self::dependencies_changed) when the model,
/// canvas, or theme is replaced. Until attached the pane is in its absence
/// state — no canvas view, no subscriptions, and every dependent operation
/// is a guarded no-op.
///
/// Event handling contract:
/// - set config view: own-source events replace the shared-axis extent and
///   keep this pane's height; foreign-source events leave the rect alone.
///   Either way the pool is asked to redraw, so companion panes repaint.
/// - transform config view: own-source only; applies the matrix.
/// - reset zoom: unconditional reset to the fit rect.
/// - zoom at frame: strategy rect mapped through the config-space
///   transform; out-of-space targets clamp instead of failing.
pub struct FlamePane {
    scheduler: Rc<Scheduler>,
    pool: Rc<CanvasPool>,
    graph: Rc<FrameGraph>,
    config: PaneConfig,

    canvas: Option<Canvas>,
    view: Option<Rc<RefCell<CanvasView>>>,
    renderer: Option<Box<dyn Renderer>>,
    subscriptions: Vec<SubscriptionToken>,
    notice: Option<String>,
}

impl FlamePane {
    pub fn new(
        scheduler: Rc<Scheduler>,
        pool: Rc<CanvasPool>,
        graph: Rc<FrameGraph>,
        config: PaneConfig,
    ) -> Self {
        Self {
            scheduler,
            pool,
            graph,
            config,
            canvas: None,
            view: None,
            renderer: None,
            subscriptions: Vec::new(),
            notice: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    /// This pane's view identity, once attached. Stable across rectangle
    /// mutations; replaced only by detach/attach.
    pub fn view_id(&self) -> Option<ViewId> {
        self.view.as_ref().map(|v| v.borrow().id())
    }

    pub fn config_view(&self) -> Option<Rect> {
        self.view.as_ref().map(|v| v.borrow().config_view())
    }

    /// The degraded-state message when no renderer backend initialized.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Dismiss the degraded-state message.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Mount the pane on a canvas: build the canvas view, pick a renderer
    /// backend, and subscribe to the scheduler. Idempotent while attached.
    pub fn attach(&mut self, canvas: Canvas) {
        if self.is_attached() {
            return;
        }

        let space = self.graph.config_space(self.config.theme.depth_offset);
        let view = Rc::new(RefCell::new(CanvasView::new(
            space,
            &canvas,
            CanvasViewOptions {
                inverted: self.graph.inverted,
                min_width: self.graph.min_frame_duration(),
                bar_height: self.config.theme.bar_height,
                depth_offset: self.config.theme.depth_offset,
                config_space_transform: self.config.config_space_transform,
            },
        )));
        let view_id = view.borrow().id();
        self.pool.register(view_id);

        self.renderer = initialize_renderer(
            &self.config.factories,
            &self.graph,
            &self.config.renderer_options,
        );
        if self.renderer.is_none() {
            tracing::error!("failed to initialize a flame renderer");
            self.notice = Some("Failed to initialize renderer".to_owned());
        }

        self.subscribe(&view, view_id, canvas);
        self.canvas = Some(canvas);
        self.view = Some(view);
    }

    /// Unmount: drop subscriptions, pool registration, view, and renderer.
    /// Events dispatched afterwards no longer reach this pane.
    pub fn detach(&mut self) {
        for token in self.subscriptions.drain(..) {
            self.scheduler.off(token);
        }
        if let Some(view) = self.view.take() {
            self.pool.unregister(view.borrow().id());
        }
        self.canvas = None;
        self.renderer = None;
        self.notice = None;
    }

    /// Replace model, canvas, or theme. The only path that re-creates the
    /// view identity: an attached pane is detached and re-attached so stale
    /// handlers can never touch the new view.
    pub fn dependencies_changed(&mut self, change: DependencyChange) {
        let was_attached = self.is_attached();
        let canvas = change.canvas.or(self.canvas);
        self.detach();

        if let Some(graph) = change.graph {
            self.graph = graph;
        }
        if let Some(theme) = change.theme {
            self.config.theme = theme;
        }

        if was_attached
            && let Some(canvas) = canvas
        {
            self.attach(canvas);
        }
    }

    /// Produce this pane's command stream for the current frame. Empty in
    /// the detached and no-renderer states.
    pub fn paint(&mut self) -> Vec<RenderCommand> {
        let (Some(renderer), Some(view), Some(canvas)) =
            (self.renderer.as_mut(), self.view.as_ref(), self.canvas)
        else {
            return Vec::new();
        };
        renderer.render(&self.graph, &view.borrow(), &canvas)
    }

    fn subscribe(&mut self, view: &Rc<RefCell<CanvasView>>, view_id: ViewId, canvas: Canvas) {
        {
            let view = Rc::clone(view);
            let pool = Rc::clone(&self.pool);
            self.subscriptions
                .push(self.scheduler.on(EventKind::SetConfigView, move |event| {
                    if let ViewEvent::SetConfigView { rect, source } = event {
                        if *source == view_id {
                            let mut view = view.borrow_mut();
                            let height = view.config_view().h;
                            view.set_config_view(rect.with_height(height));
                        }
                        // Foreign-source events still repaint: the sender's
                        // rect moved and this pane may be showing it.
                        pool.request_draw();
                    }
                }));
        }

        {
            let view = Rc::clone(view);
            let pool = Rc::clone(&self.pool);
            self.subscriptions.push(self.scheduler.on(
                EventKind::TransformConfigView,
                move |event| {
                    if let ViewEvent::TransformConfigView { transform, source } = event {
                        if *source == view_id {
                            view.borrow_mut().transform_config_view(transform);
                        }
                        pool.request_draw();
                    }
                },
            ));
        }

        {
            let view = Rc::clone(view);
            let pool = Rc::clone(&self.pool);
            self.subscriptions
                .push(self.scheduler.on(EventKind::ResetZoom, move |_| {
                    view.borrow_mut().reset_config_view(&canvas);
                    pool.request_draw();
                }));
        }

        {
            let view = Rc::clone(view);
            let pool = Rc::clone(&self.pool);
            self.subscriptions
                .push(self.scheduler.on(EventKind::ZoomAtFrame, move |event| {
                    if let ViewEvent::ZoomAtFrame { frame, strategy } = event {
                        let mut view = view.borrow_mut();
                        let target = config_view_for_frame(
                            *strategy,
                            view.config_view(),
                            frame.to_rect(),
                            view.min_width(),
                        );
                        let target = view.config_space_transform().apply_rect(&target);
                        view.set_config_view(target);
                        pool.request_draw();
                    }
                }));
        }
    }
}

impl Drop for FlamePane {
    fn drop(&mut self) {
        self.detach();
    }
}
