use std::cell::{Cell, RefCell};

use crate::view::ViewId;

/// Coalescing redraw broadcaster shared by all panes.
///
/// Any subscriber may request a redraw; requests between two frames collapse
/// into a single paint pass. The host calls [`CanvasPool::begin_frame`] once
/// per event-loop turn and repaints every registered canvas when it returns
/// true.
#[derive(Default)]
pub struct CanvasPool {
    registered: RefCell<Vec<ViewId>>,
    dirty: Cell<bool>,
    draws_requested: Cell<u64>,
    frames_painted: Cell<u64>,
}

impl CanvasPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: ViewId) {
        let mut registered = self.registered.borrow_mut();
        if !registered.contains(&id) {
            registered.push(id);
        }
    }

    pub fn unregister(&self, id: ViewId) {
        self.registered.borrow_mut().retain(|r| *r != id);
    }

    pub fn registered_count(&self) -> usize {
        self.registered.borrow().len()
    }

    /// Request a pool-wide redraw. Cheap and idempotent within a frame.
    pub fn request_draw(&self) {
        self.dirty.set(true);
        self.draws_requested.set(self.draws_requested.get() + 1);
    }

    /// True when a paint pass is due; clears the dirty flag so the next
    /// call returns false until another draw is requested.
    pub fn begin_frame(&self) -> bool {
        if self.dirty.replace(false) {
            self.frames_painted.set(self.frames_painted.get() + 1);
            true
        } else {
            false
        }
    }

    /// Total `request_draw` calls, for instrumentation and tests.
    pub fn draws_requested(&self) -> u64 {
        self.draws_requested.get()
    }

    /// Total coalesced paint passes.
    pub fn frames_painted(&self) -> u64 {
        self.frames_painted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::view::{CanvasView, CanvasViewOptions};
    use emberpane_protocol::Rect;

    fn view_id() -> ViewId {
        CanvasView::new(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            &Canvas::new(10, 10, 1.0),
            CanvasViewOptions::default(),
        )
        .id()
    }

    #[test]
    fn draws_coalesce_into_one_frame() {
        let pool = CanvasPool::new();
        pool.request_draw();
        pool.request_draw();
        pool.request_draw();

        assert!(pool.begin_frame());
        assert!(!pool.begin_frame());
        assert_eq!(pool.draws_requested(), 3);
        assert_eq!(pool.frames_painted(), 1);
    }

    #[test]
    fn clean_pool_has_no_frame_due() {
        let pool = CanvasPool::new();
        assert!(!pool.begin_frame());
        assert_eq!(pool.frames_painted(), 0);
    }

    #[test]
    fn registration_is_idempotent() {
        let pool = CanvasPool::new();
        let id = view_id();
        pool.register(id);
        pool.register(id);
        assert_eq!(pool.registered_count(), 1);
        pool.unregister(id);
        assert_eq!(pool.registered_count(), 0);
    }
}
