//! Output streams - push-based channels for element events.
//!
//! A [`channel`] yields one [`Sink`] (the single producer) and a cloneable
//! [`Stream`] (any number of consumers). Pushing a value:
//! 1. Updates the stream's `latest` signal (so effects can track it)
//! 2. Calls every subscriber, in subscription order
//!
//! Holding a stream has no side effects. Nothing runs until a subscriber or an
//! effect reads it.
//!
//! # Example
//!
//! ```ignore
//! let (sink, clicks) = channel::<u32>();
//!
//! let unsubscribe = clicks.subscribe(|n| println!("click #{n}"));
//! sink.push(1);
//! unsubscribe();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use spark_signals::{Signal, signal};

use crate::types::Cleanup;

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct StreamInner<T: Clone + PartialEq + 'static> {
    subscribers: RefCell<Vec<(usize, Subscriber<T>)>>,
    next_id: Cell<usize>,
    latest: Signal<Option<T>>,
    emitted: Cell<u64>,
    closed: Cell<bool>,
}

/// Consumer side of a channel.
pub struct Stream<T: Clone + PartialEq + 'static> {
    inner: Rc<StreamInner<T>>,
}

impl<T: Clone + PartialEq + 'static> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Producer side of a channel. Not cloneable: one producer per stream.
pub struct Sink<T: Clone + PartialEq + 'static> {
    inner: Rc<StreamInner<T>>,
}

/// Create a connected sink/stream pair.
pub fn channel<T: Clone + PartialEq + 'static>() -> (Sink<T>, Stream<T>) {
    let inner = Rc::new(StreamInner {
        subscribers: RefCell::new(Vec::new()),
        next_id: Cell::new(0),
        latest: signal(None),
        emitted: Cell::new(0),
        closed: Cell::new(false),
    });
    (
        Sink {
            inner: Rc::clone(&inner),
        },
        Stream { inner },
    )
}

impl<T: Clone + PartialEq + 'static> Stream<T> {
    /// Call `f` for every future value. Returns the unsubscribe function.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Cleanup {
        if self.inner.closed.get() {
            return Box::new(|| {});
        }
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));

        let weak: Weak<StreamInner<T>> = Rc::downgrade(&self.inner);
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
            }
        })
    }

    /// Most recent value. Reading inside an effect creates a dependency.
    pub fn latest(&self) -> Option<T> {
        self.inner.latest.get()
    }

    /// The signal behind [`latest`](Self::latest), for binding elsewhere.
    pub fn latest_signal(&self) -> Signal<Option<T>> {
        self.inner.latest.clone()
    }

    /// Number of values pushed so far.
    pub fn emit_count(&self) -> u64 {
        self.inner.emitted.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Closed streams accept no new subscribers and receive no values.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    /// Whether two handles observe the same channel.
    pub fn same_stream(&self, other: &Stream<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + PartialEq + 'static> Sink<T> {
    /// Deliver a value to every subscriber. Ignored once closed.
    pub fn push(&self, value: T) {
        if self.inner.closed.get() {
            return;
        }
        self.inner.emitted.set(self.inner.emitted.get() + 1);
        self.inner.latest.set(Some(value.clone()));

        // Snapshot so subscribers may (un)subscribe while being called
        let subscribers: Vec<Subscriber<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| Rc::clone(f))
            .collect();
        for subscriber in subscribers {
            subscriber(&value);
        }
    }

    /// Drop all subscribers and stop accepting values. Idempotent.
    pub fn close(&self) {
        self.inner.closed.set(true);
        self.inner.subscribers.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;

    #[test]
    fn test_push_reaches_subscribers_in_order() {
        let (sink, stream) = channel::<i32>();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s1 = seen.clone();
        let _u1 = stream.subscribe(move |v| s1.borrow_mut().push(("a", *v)));
        let s2 = seen.clone();
        let _u2 = stream.subscribe(move |v| s2.borrow_mut().push(("b", *v)));

        sink.push(7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
        assert_eq!(stream.emit_count(), 1);
        assert_eq!(stream.latest(), Some(7));
    }

    #[test]
    fn test_unsubscribe() {
        let (sink, stream) = channel::<i32>();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let unsubscribe = stream.subscribe(move |_| c.set(c.get() + 1));

        sink.push(1);
        unsubscribe();
        sink.push(2);
        assert_eq!(count.get(), 1);
        assert_eq!(stream.subscriber_count(), 0);
    }

    #[test]
    fn test_holding_a_stream_is_inert() {
        let (_sink, stream) = channel::<String>();
        let copy = stream.clone();
        assert!(copy.same_stream(&stream));
        assert_eq!(stream.latest(), None);
        assert_eq!(stream.emit_count(), 0);
    }

    #[test]
    fn test_close_stops_delivery() {
        let (sink, stream) = channel::<i32>();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let _u = stream.subscribe(move |_| c.set(c.get() + 1));

        sink.close();
        sink.close();
        sink.push(1);
        assert_eq!(count.get(), 0);
        assert!(stream.is_closed());

        let _late = stream.subscribe(|_| panic!("closed stream delivered a value"));
        sink.push(2);
    }

    #[test]
    fn test_subscriber_may_unsubscribe_itself() {
        let (sink, stream) = channel::<i32>();
        let slot: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));

        let slot_clone = slot.clone();
        let c = count.clone();
        let unsubscribe = stream.subscribe(move |_| {
            c.set(c.get() + 1);
            if let Some(unsubscribe) = slot_clone.borrow_mut().take() {
                unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(unsubscribe);

        sink.push(1);
        sink.push(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_latest_is_reactive() {
        let (sink, stream) = channel::<i32>();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let tracked = stream.clone();
        let _stop = effect(move || {
            let _ = tracked.latest();
            r.set(r.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        sink.push(5);
        assert_eq!(runs.get(), 2);
    }
}
