use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use emberpane_protocol::{Rect, Transform};

use crate::model::FrameBounds;
use crate::view::ViewId;
use crate::zoom::ZoomStrategy;

/// A coordination event between canvas views.
///
/// Transient — an event exists only for the duration of one dispatch.
/// `source` identifies the originating view so handlers can filter to
/// events from their own instance.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    SetConfigView { rect: Rect, source: ViewId },
    TransformConfigView { transform: Transform, source: ViewId },
    ResetZoom,
    ZoomAtFrame { frame: FrameBounds, strategy: ZoomStrategy },
}

impl ViewEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ViewEvent::SetConfigView { .. } => EventKind::SetConfigView,
            ViewEvent::TransformConfigView { .. } => EventKind::TransformConfigView,
            ViewEvent::ResetZoom => EventKind::ResetZoom,
            ViewEvent::ZoomAtFrame { .. } => EventKind::ZoomAtFrame,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SetConfigView,
    TransformConfigView,
    ResetZoom,
    ZoomAtFrame,
}

/// Capability token returned by [`Scheduler::on`]; passing it to
/// [`Scheduler::off`] removes the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

struct Subscriber {
    token: SubscriptionToken,
    kind: EventKind,
    handler: Box<dyn FnMut(&ViewEvent)>,
}

enum Pending {
    Subscribe(Subscriber),
    Unsubscribe(SubscriptionToken),
    Dispatch(ViewEvent),
}

/// Synchronous typed pub/sub bus for view coordination.
///
/// Dispatch is a same-turn fan-out: handlers run in subscription order on
/// the calling thread before `dispatch` returns. Subscription changes made
/// from inside a handler take effect after the current fan-out — an
/// in-flight event still reaches a handler that unsubscribed during it, but
/// no future event will. Events dispatched from inside a handler are
/// delivered after the current event completes, still within the same turn.
#[derive(Default)]
pub struct Scheduler {
    subscribers: RefCell<Vec<Subscriber>>,
    pending: RefCell<Vec<Pending>>,
    next_token: Cell<u64>,
    dispatching: Cell<bool>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        &self,
        kind: EventKind,
        handler: impl FnMut(&ViewEvent) + 'static,
    ) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token.get());
        self.next_token.set(token.0 + 1);
        let subscriber = Subscriber {
            token,
            kind,
            handler: Box::new(handler),
        };
        if self.dispatching.get() {
            self.pending.borrow_mut().push(Pending::Subscribe(subscriber));
        } else {
            self.subscribers.borrow_mut().push(subscriber);
        }
        token
    }

    pub fn off(&self, token: SubscriptionToken) {
        if self.dispatching.get() {
            self.pending.borrow_mut().push(Pending::Unsubscribe(token));
        } else {
            self.subscribers.borrow_mut().retain(|s| s.token != token);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn dispatch(&self, event: ViewEvent) {
        if self.dispatching.get() {
            self.pending.borrow_mut().push(Pending::Dispatch(event));
            return;
        }

        self.dispatching.set(true);
        // The subscriber list is moved out for the duration of the fan-out;
        // reentrant on/off/dispatch calls land in `pending`.
        let mut subscribers = self.subscribers.take();
        let mut queue = VecDeque::new();
        queue.push_back(event);

        while let Some(event) = queue.pop_front() {
            let kind = event.kind();
            for subscriber in subscribers.iter_mut() {
                if subscriber.kind == kind {
                    (subscriber.handler)(&event);
                }
            }
            for op in self.pending.borrow_mut().drain(..) {
                match op {
                    Pending::Subscribe(s) => subscribers.push(s),
                    Pending::Unsubscribe(t) => subscribers.retain(|s| s.token != t),
                    Pending::Dispatch(e) => queue.push_back(e),
                }
            }
        }

        *self.subscribers.borrow_mut() = subscribers;
        self.dispatching.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn reset_event() -> ViewEvent {
        ViewEvent::ResetZoom
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let scheduler = Scheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let order = Rc::clone(&order);
            scheduler.on(EventKind::ResetZoom, move |_| order.borrow_mut().push(i));
        }

        scheduler.dispatch(reset_event());
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn handlers_only_receive_their_kind() {
        let scheduler = Scheduler::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        scheduler.on(EventKind::ResetZoom, move |_| h.set(h.get() + 1));

        scheduler.dispatch(ViewEvent::ZoomAtFrame {
            frame: FrameBounds {
                start: 0.0,
                end: 1.0,
                depth: 0,
            },
            strategy: ZoomStrategy::Exact,
        });
        assert_eq!(hits.get(), 0);

        scheduler.dispatch(reset_event());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn off_stops_future_dispatches() {
        let scheduler = Scheduler::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let token = scheduler.on(EventKind::ResetZoom, move |_| h.set(h.get() + 1));

        scheduler.dispatch(reset_event());
        scheduler.off(token);
        scheduler.dispatch(reset_event());
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_during_dispatch_is_deferred() {
        let scheduler = Rc::new(Scheduler::new());
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let token = Rc::new(Cell::new(None));
        let t = Rc::clone(&token);
        let s = Rc::clone(&scheduler);
        let registered = scheduler.on(EventKind::ResetZoom, move |_| {
            h.set(h.get() + 1);
            if let Some(tok) = t.get() {
                s.off(tok);
            }
        });
        token.set(Some(registered));

        // The handler unsubscribes itself mid-dispatch: it still sees the
        // in-flight event, but not the next one.
        scheduler.dispatch(reset_event());
        scheduler.dispatch(reset_event());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dispatch_during_dispatch_is_delivered_same_turn() {
        let scheduler = Rc::new(Scheduler::new());
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = Rc::clone(&order);
        let s = Rc::clone(&scheduler);
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        scheduler.on(EventKind::ResetZoom, move |_| {
            o.borrow_mut().push("reset");
            if !f.get() {
                f.set(true);
                s.dispatch(ViewEvent::SetConfigView {
                    rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                    source: dummy_view_id(),
                });
            }
        });

        let o = Rc::clone(&order);
        scheduler.on(EventKind::SetConfigView, move |_| {
            o.borrow_mut().push("set");
        });

        scheduler.dispatch(reset_event());
        assert_eq!(*order.borrow(), vec!["reset", "set"]);
    }

    fn dummy_view_id() -> ViewId {
        use crate::canvas::Canvas;
        use crate::view::{CanvasView, CanvasViewOptions};
        CanvasView::new(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            &Canvas::new(10, 10, 1.0),
            CanvasViewOptions::default(),
        )
        .id()
    }
}
