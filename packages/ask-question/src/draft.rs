//! The question being drafted, and the store that keeps it.
//!
//! Actions only ever read the draft through [`DraftSource`]. The
//! [`QuestionStore`] is the usual owner. It sits in front of the bus as an
//! [`EventSink`]: each event is folded into the state before it is
//! broadcast, so a read right after a dispatch sees it.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use kitsune_api::NewQuestion;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bus::{CorrelationId, EventBus, EventEnvelope, EventSink};
use crate::events::{FormEvent, Product, Topic};
use crate::suggestion::Suggestion;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub product: Option<Product>,
    pub topic: Option<Topic>,
    pub title: String,
    pub content: String,
}

impl QuestionDraft {
    pub fn product_slug(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.slug.as_str())
    }

    /// The body sent to the question creation endpoint.
    pub fn to_new_question(&self) -> NewQuestion {
        NewQuestion {
            product: self.product.as_ref().map(|p| p.slug.clone()),
            topic: self.topic.as_ref().map(|t| t.slug.clone()),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

/// Read access to the current draft.
pub trait DraftSource: Send + Sync {
    fn question(&self) -> QuestionDraft;
}

/// A fixed draft, for callers that assemble the question themselves.
impl DraftSource for QuestionDraft {
    fn question(&self) -> QuestionDraft {
        self.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub question: QuestionDraft,
    pub suggestions: Vec<Suggestion>,
    pub submission: SubmissionStatus,
}

/// Reducer-style store for the form.
#[derive(Clone, Default)]
pub struct QuestionStore {
    state: Arc<RwLock<StoreState>>,
    bus: Option<EventBus>,
}

impl QuestionStore {
    /// A store that keeps events to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that forwards every applied event to `bus`.
    pub fn with_bus(bus: EventBus) -> Self {
        Self {
            state: Arc::default(),
            bus: Some(bus),
        }
    }

    /// Fold one event into the state.
    pub fn apply(&self, event: &FormEvent) {
        let mut state = self.write();
        match event {
            FormEvent::SetProduct { product } => state.question.product = Some(product.clone()),
            FormEvent::SetTopic { topic } => state.question.topic = Some(topic.clone()),
            FormEvent::SetTitle { title } => state.question.title = title.clone(),
            FormEvent::SetContent { content } => state.question.content = content.clone(),
            FormEvent::SetSuggestions { suggestions } => state.suggestions = suggestions.clone(),
            FormEvent::QuestionSubmitOptimistic => state.submission = SubmissionStatus::Submitting,
            FormEvent::QuestionSubmitSuccess => state.submission = SubmissionStatus::Submitted,
            FormEvent::QuestionSubmitFailure { error } => {
                state.submission = SubmissionStatus::Failed(error.clone())
            }
        }
    }

    pub fn snapshot(&self) -> StoreState {
        self.read().clone()
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.read().suggestions.clone()
    }

    pub fn submission(&self) -> SubmissionStatus {
        self.read().submission.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for QuestionStore {
    fn dispatch_with_correlation(&self, event: FormEvent, cid: CorrelationId) {
        debug!(event = event.kind(), %cid, "Store applying event");
        self.apply(&event);
        if let Some(bus) = &self.bus {
            bus.emit(EventEnvelope::new(cid, event));
        }
    }
}

impl DraftSource for QuestionStore {
    fn question(&self) -> QuestionDraft {
        self.read().question.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_events_fill_the_draft() {
        let store = QuestionStore::new();

        store.apply(&FormEvent::SetProduct {
            product: Product::new(1, "firefox", "Firefox"),
        });
        store.apply(&FormEvent::SetTopic {
            topic: Topic::new(2, "crashes", "Crashes"),
        });
        store.apply(&FormEvent::SetTitle {
            title: "Crash on startup".into(),
        });
        store.apply(&FormEvent::SetContent {
            content: "Every time".into(),
        });

        let draft = store.question();
        assert_eq!(draft.product_slug(), Some("firefox"));
        assert_eq!(draft.topic.unwrap().slug, "crashes");
        assert_eq!(draft.title, "Crash on startup");
        assert_eq!(draft.content, "Every time");
    }

    #[test]
    fn test_suggestions_are_replaced_not_merged() {
        let store = QuestionStore::new();
        let doc = |title: &str| Suggestion::Document {
            title: title.into(),
            url: format!("/kb/{}", title),
            summary: String::new(),
        };

        store.apply(&FormEvent::SetSuggestions {
            suggestions: vec![doc("a"), doc("b")],
        });
        store.apply(&FormEvent::SetSuggestions {
            suggestions: vec![doc("c")],
        });

        assert_eq!(store.suggestions(), vec![doc("c")]);
    }

    #[test]
    fn test_submission_status_follows_events() {
        let store = QuestionStore::new();
        assert_eq!(store.submission(), SubmissionStatus::Idle);

        store.apply(&FormEvent::QuestionSubmitOptimistic);
        assert_eq!(store.submission(), SubmissionStatus::Submitting);

        store.apply(&FormEvent::QuestionSubmitFailure {
            error: "Bad Request".into(),
        });
        assert_eq!(
            store.submission(),
            SubmissionStatus::Failed("Bad Request".into())
        );

        store.apply(&FormEvent::QuestionSubmitOptimistic);
        store.apply(&FormEvent::QuestionSubmitSuccess);
        assert_eq!(store.submission(), SubmissionStatus::Submitted);
    }

    #[test]
    fn test_new_question_uses_slugs() {
        let draft = QuestionDraft {
            product: Some(Product::new(1, "firefox", "Firefox")),
            topic: None,
            title: "t".into(),
            content: "c".into(),
        };

        let body = draft.to_new_question();
        assert_eq!(body.product.as_deref(), Some("firefox"));
        assert_eq!(body.topic, None);
        assert_eq!(body.title, "t");
    }

    #[test]
    fn test_dispatch_is_visible_before_it_returns() {
        let store = QuestionStore::new();

        store.dispatch(FormEvent::SetContent {
            content: "right away".into(),
        });

        assert_eq!(store.question().content, "right away");
    }

    #[tokio::test]
    async fn test_dispatch_forwards_to_bus_after_applying() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();
        let store = QuestionStore::with_bus(bus);

        let cid = CorrelationId::new();
        store.dispatch_with_correlation(
            FormEvent::SetTitle {
                title: "from store".into(),
            },
            cid,
        );

        assert_eq!(store.question().title, "from store");
        let envelope = receiver.recv().await.unwrap();
        assert_eq!(envelope.cid, cid);
        assert_eq!(
            envelope.event,
            FormEvent::SetTitle {
                title: "from store".into()
            }
        );
    }
}
