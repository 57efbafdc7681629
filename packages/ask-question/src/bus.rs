//! Event bus the form actions post to.
//!
//! # Guarantees
//!
//! - **Fire-and-forget**: posting never blocks and returns nothing to the caller
//! - **At-most-once delivery**: slow receivers may miss events
//! - **No replay**: subscribers only see events posted after they subscribed
//!
//! Actions depend on [`EventSink`], not on [`EventBus`] directly, so tests and
//! embedders can substitute their own sink.

use std::fmt;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::events::FormEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CAPACITY: usize = 1024;

/// Correlation ID tying related events together.
///
/// The events of one submission (optimistic, then success or failure) share
/// a correlation ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event together with its transport metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope {
    pub cid: CorrelationId,
    pub emitted_at: DateTime<Utc>,
    pub event: FormEvent,
}

impl EventEnvelope {
    pub fn new(cid: CorrelationId, event: FormEvent) -> Self {
        Self {
            cid,
            emitted_at: Utc::now(),
            event,
        }
    }
}

/// Where form actions post their events.
pub trait EventSink: Send + Sync {
    /// Post an event tagged with an existing correlation ID.
    fn dispatch_with_correlation(&self, event: FormEvent, cid: CorrelationId);

    /// Post an event under a fresh correlation ID.
    fn dispatch(&self, event: FormEvent) {
        self.dispatch_with_correlation(event, CorrelationId::new());
    }
}

/// Broadcast bus for form events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// The capacity bounds how many events are buffered before slow
    /// receivers start lagging.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Post an envelope. Returns the number of receivers that got it.
    pub fn emit(&self, envelope: EventEnvelope) -> usize {
        self.sender.send(envelope).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSink for EventBus {
    fn dispatch_with_correlation(&self, event: FormEvent, cid: CorrelationId) {
        tracing::debug!(event = event.kind(), %cid, "Dispatching form event");
        self.emit(EventEnvelope::new(cid, event));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_and_receive() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        bus.dispatch(FormEvent::SetTitle { title: "t".into() });

        let envelope = receiver.recv().await.unwrap();
        assert_eq!(envelope.event, FormEvent::SetTitle { title: "t".into() });
    }

    #[tokio::test]
    async fn test_dispatch_with_correlation_keeps_cid() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        let cid = CorrelationId::new();
        bus.dispatch_with_correlation(FormEvent::QuestionSubmitOptimistic, cid);
        bus.dispatch_with_correlation(FormEvent::QuestionSubmitSuccess, cid);

        assert_eq!(receiver.recv().await.unwrap().cid, cid);
        assert_eq!(receiver.recv().await.unwrap().cid, cid);
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new();
        let mut receiver1 = bus.subscribe();
        let mut receiver2 = bus.subscribe();

        bus.dispatch(FormEvent::QuestionSubmitSuccess);

        let envelope1 = receiver1.recv().await.unwrap();
        let envelope2 = receiver2.recv().await.unwrap();
        assert_eq!(envelope1.event, FormEvent::QuestionSubmitSuccess);
        assert_eq!(envelope1.cid, envelope2.cid);
    }

    #[test]
    fn test_emit_without_subscribers_is_dropped() {
        let bus = EventBus::new();
        let count = bus.emit(EventEnvelope::new(
            CorrelationId::new(),
            FormEvent::QuestionSubmitSuccess,
        ));
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_events() {
        let bus = EventBus::new();

        bus.dispatch(FormEvent::SetContent {
            content: "first".into(),
        });
        let mut receiver = bus.subscribe();
        bus.dispatch(FormEvent::SetContent {
            content: "second".into(),
        });

        let envelope = receiver.recv().await.unwrap();
        assert_eq!(
            envelope.event,
            FormEvent::SetContent {
                content: "second".into()
            }
        );
    }

    #[tokio::test]
    async fn test_clone_shares_channel() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();
        let mut receiver = bus1.subscribe();

        bus2.dispatch(FormEvent::QuestionSubmitOptimistic);

        assert_eq!(
            receiver.recv().await.unwrap().event,
            FormEvent::QuestionSubmitOptimistic
        );
    }

    #[test]
    fn test_debug_impl() {
        let bus = EventBus::new();
        let _r1 = bus.subscribe();
        let debug_str = format!("{:?}", bus);
        assert!(debug_str.contains("subscriber_count"));
    }
}
