//! Integration test: two panes (flame + timeline) on one scheduler/pool,
//! verifying source filtering, shared-axis synchronization, and coalesced
//! redraws end to end.

use std::rc::Rc;

use emberpane_core::model::{FrameBounds, FrameGraph, FrameNode};
use emberpane_core::pane::{FlamePane, PaneConfig, PaneTheme};
use emberpane_core::render::TimelineRenderer;
use emberpane_core::{Canvas, CanvasPool, Scheduler, ViewEvent, ZoomStrategy};
use emberpane_protocol::Rect;

fn graph() -> Rc<FrameGraph> {
    Rc::new(FrameGraph::from_frames(
        Some("demo".to_owned()),
        vec![
            FrameNode {
                id: 0,
                name: "main".into(),
                start: 0.0,
                end: 100.0,
                depth: 0,
                parent: None,
            },
            FrameNode {
                id: 1,
                name: "child".into(),
                start: 10.0,
                end: 50.0,
                depth: 1,
                parent: Some(0),
            },
        ],
    ))
}

#[test]
fn zoom_at_frame_exact_scenario() {
    let scheduler = Rc::new(Scheduler::new());
    let pool = Rc::new(CanvasPool::new());
    let mut pane = FlamePane::new(
        Rc::clone(&scheduler),
        Rc::clone(&pool),
        graph(),
        PaneConfig::default(),
    );
    pane.attach(Canvas::new(800, 40, 1.0));

    scheduler.dispatch(ViewEvent::ZoomAtFrame {
        frame: FrameBounds {
            start: 10.0,
            end: 50.0,
            depth: 1,
        },
        strategy: ZoomStrategy::Exact,
    });

    // x:[10,50], depth row 1, height 1.
    assert_eq!(pane.config_view(), Some(Rect::new(10.0, 1.0, 40.0, 1.0)));

    // Exactly one redraw request, coalesced into one paint pass.
    assert_eq!(pool.draws_requested(), 1);
    assert!(pool.begin_frame());
    assert!(!pool.begin_frame());
}

#[test]
fn two_panes_filter_by_source_and_coalesce_redraws() {
    let scheduler = Rc::new(Scheduler::new());
    let pool = Rc::new(CanvasPool::new());

    let mut flame = FlamePane::new(
        Rc::clone(&scheduler),
        Rc::clone(&pool),
        graph(),
        PaneConfig::default(),
    );
    flame.attach(Canvas::new(800, 40, 1.0));

    let mut timeline = FlamePane::new(
        Rc::clone(&scheduler),
        Rc::clone(&pool),
        graph(),
        PaneConfig {
            theme: PaneTheme {
                bar_height: 8.0,
                depth_offset: 0.0,
            },
            factories: vec![TimelineRenderer::factory],
            ..PaneConfig::default()
        },
    );
    timeline.attach(Canvas::new(800, 16, 1.0));

    let flame_id = flame.view_id().expect("flame pane attached");
    let timeline_id = timeline.view_id().expect("timeline pane attached");
    let timeline_before = timeline.config_view().expect("timeline view");

    // An event sourced from the flame view moves only the flame pane.
    scheduler.dispatch(ViewEvent::SetConfigView {
        rect: Rect::new(40.0, 0.0, 50.0, 1.0),
        source: flame_id,
    });
    assert_eq!(flame.config_view().map(|r| r.x), Some(40.0));
    assert_eq!(timeline.config_view(), Some(timeline_before));

    // Both panes requested a redraw; they collapse into one paint pass.
    assert_eq!(pool.draws_requested(), 2);
    assert!(pool.begin_frame());
    assert!(!pool.begin_frame());

    // The host mirrors the shared axis onto the timeline's own source; the
    // timeline keeps its independent height.
    let shared = flame.config_view().expect("flame view");
    scheduler.dispatch(ViewEvent::SetConfigView {
        rect: shared,
        source: timeline_id,
    });
    let timeline_view = timeline.config_view().expect("timeline view");
    assert_eq!(timeline_view.x, shared.x);
    assert_eq!(timeline_view.w, shared.w);
    assert_eq!(timeline_view.h, timeline_before.h);

    // Reset is unconditional: both panes return to their fit rects.
    scheduler.dispatch(ViewEvent::ResetZoom);
    assert_eq!(flame.config_view().map(|r| r.x), Some(0.0));
    assert_eq!(flame.config_view().map(|r| r.w), Some(100.0));
    assert_eq!(timeline.config_view().map(|r| r.w), Some(100.0));
}

#[test]
fn detached_pane_is_inert_while_companion_keeps_working() {
    let scheduler = Rc::new(Scheduler::new());
    let pool = Rc::new(CanvasPool::new());

    let mut a = FlamePane::new(
        Rc::clone(&scheduler),
        Rc::clone(&pool),
        graph(),
        PaneConfig::default(),
    );
    let mut b = FlamePane::new(
        Rc::clone(&scheduler),
        Rc::clone(&pool),
        graph(),
        PaneConfig::default(),
    );
    a.attach(Canvas::new(800, 40, 1.0));
    b.attach(Canvas::new(800, 40, 1.0));
    assert_eq!(pool.registered_count(), 2);

    let b_id = b.view_id().expect("pane b attached");
    a.detach();
    assert_eq!(pool.registered_count(), 1);

    scheduler.dispatch(ViewEvent::SetConfigView {
        rect: Rect::new(40.0, 0.0, 50.0, 1.0),
        source: b_id,
    });

    assert!(a.config_view().is_none());
    assert_eq!(b.config_view().map(|r| r.x), Some(40.0));
    // Only the live pane requested the redraw.
    assert_eq!(pool.draws_requested(), 1);
}
