//! Synchronous publish/subscribe for timeline observers
//!
//! Handlers run on the publishing thread, in subscription order, before
//! `publish` returns. A handler must not publish on the same bus.

pub mod timeline;

use std::any::{Any, TypeId};
use ahash::AHashMap;
use parking_lot::Mutex;

/// Anything that can travel over an [`EventBus`]
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

type Subscribers = AHashMap<TypeId, Vec<Box<dyn EventHandler>>>;

/// Routes each event to the handlers subscribed to its concrete type
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Subscribers>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        self.subscribers
            .lock()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(handler);
    }

    /// Subscribe a closure that only sees `E`
    pub fn on<E, F>(&self, f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E>(typed_handler(f));
    }

    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.subscribers
            .lock()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    pub fn publish<E: Event>(&self, event: E) {
        let mut subscribers = self.subscribers.lock();
        if let Some(handlers) = subscribers.get_mut(&TypeId::of::<E>()) {
            for handler in handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

struct FnHandler<F>(F);

impl<F> EventHandler for FnHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.0)(event);
    }
}

/// Wrap a closure over any event
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(FnHandler(f))
}

/// Wrap a closure that only sees events of type `E`
pub fn typed_handler<E, F>(mut f: F) -> Box<dyn EventHandler>
where
    E: Event,
    F: FnMut(&E) + Send + Sync + 'static,
{
    handler_from_fn(move |event| {
        if let Some(event) = event.as_any().downcast_ref::<E>() {
            f(event);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::timeline::{FrameChanged, PlaybackToggled};
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_publish_reaches_only_matching_subscribers() {
        let bus = EventBus::new();
        let frames = Arc::new(Mutex::new(Vec::new()));
        let toggles = Arc::new(Mutex::new(0));

        let seen = frames.clone();
        bus.on(move |e: &FrameChanged| seen.lock().push(e.frame));
        let count = toggles.clone();
        bus.subscribe::<PlaybackToggled>(typed_handler(move |_: &PlaybackToggled| *count.lock() += 1));

        bus.publish(FrameChanged { frame: 3, frame_count: 10 });
        bus.publish(FrameChanged { frame: 4, frame_count: 10 });

        assert_eq!(*frames.lock(), vec![3, 4]);
        assert_eq!(*toggles.lock(), 0);
        assert_eq!(bus.subscriber_count::<FrameChanged>(), 1);
    }

    #[test]
    fn test_untyped_handler_sees_every_subscribed_type() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(0));
        let counter = seen.clone();
        bus.subscribe::<PlaybackToggled>(handler_from_fn(move |event| {
            if event.as_any().is::<PlaybackToggled>() {
                *counter.lock() += 1;
            }
        }));

        bus.publish(PlaybackToggled { playing: true });
        bus.publish(FrameChanged { frame: 0, frame_count: 0 });
        assert_eq!(*seen.lock(), 1);
    }
}
