//! Typed publish/subscribe hub between the polling state machine and its
//! consumers.
//!
//! Delivery is synchronous and in registration order. There is no buffering:
//! a handler only sees events published while it is subscribed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use super::signal::{MatchEvent, MatchEventKind};

type Handler = Arc<dyn Fn(&MatchEvent) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    kind: MatchEventKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

#[derive(Default)]
pub struct EventBus {
    registry: Mutex<Registry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // A handler that panicked mid-publish leaves nothing half-written in
        // the registry, so a poisoned lock is still usable.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handler` for events of `kind`.
    pub fn subscribe<F>(&self, kind: MatchEventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&MatchEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.subscribers.push(Subscriber {
            id,
            kind,
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry();
        let before = registry.subscribers.len();
        registry.subscribers.retain(|s| s.id != id);
        registry.subscribers.len() != before
    }

    /// Deliver `event` to every current subscriber of its kind.
    ///
    /// Handlers run after the registry lock is released, so they may
    /// subscribe or unsubscribe; such changes apply from the next publish.
    pub fn publish(&self, event: &MatchEvent) {
        let kind = event.kind();
        let handlers: Vec<Handler> = self
            .registry()
            .subscribers
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| Arc::clone(&s.handler))
            .collect();

        trace!(event = kind.name(), subscribers = handlers.len(), "Publishing");

        for handler in handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self, kind: MatchEventKind) -> usize {
        self.registry()
            .subscribers
            .iter()
            .filter(|s| s.kind == kind)
            .count()
    }
}
