//! Generic event bus: synchronous handlers plus a broadcast channel for
//! async consumers.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Subscription handle for unsubscribing a synchronous handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type Handler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Event bus generic over the event type.
///
/// Synchronous handlers run on the publishing thread, in registration
/// order; async consumers receive a clone through a tokio broadcast
/// channel. Publishing never fails: a bus with no listeners simply
/// drops the event.
pub struct EventBus<E: Clone> {
    sender: broadcast::Sender<E>,
    handlers: Arc<RwLock<HashMap<SubscriptionId, Handler<E>>>>,
}

impl<E: Clone + Send + 'static> EventBus<E> {
    /// Creates a bus with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a bus with a custom broadcast channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Publishes an event to all subscribers. Returns the number of
    /// listeners that received it.
    pub fn publish(&self, event: E) -> usize {
        let handlers = self.handlers.read();
        for handler in handlers.values() {
            handler(&event);
        }
        // send() errors only when no async receiver exists; sync handlers
        // may still have seen the event.
        let receivers = self.sender.send(event).unwrap_or(0);
        let delivered = handlers.len() + receivers;
        tracing::trace!(delivered, "event published");
        delivered
    }

    /// Registers a synchronous handler, returning its subscription id.
    pub fn on(&self, handler: impl Fn(&E) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, Box::new(handler));
        id
    }

    /// Removes a handler. Returns false when the id is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.handlers.write().remove(&id).is_some()
    }

    /// Opens a broadcast receiver for async consumption.
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

impl<E: Clone + Send + 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
