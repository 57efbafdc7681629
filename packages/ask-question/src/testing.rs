//! Recording fakes for the sink and API seams.
//!
//! Available in unit tests and to downstream crates through the `testing`
//! feature:
//!
//! ```toml
//! [dev-dependencies]
//! ask-question = { path = "../ask-question", features = ["testing"] }
//! ```

use std::sync::Mutex;

use async_trait::async_trait;
use kitsune_api::{ApiError, NewQuestion, SuggestQuery, SuggestResponse};
use tokio::sync::Notify;

use crate::api::QuestionApi;
use crate::bus::{CorrelationId, EventEnvelope, EventSink};
use crate::events::FormEvent;

/// Sink that keeps every envelope it is given.
#[derive(Default)]
pub struct RecordingSink {
    envelopes: Mutex<Vec<EventEnvelope>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.envelopes.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<FormEvent> {
        self.envelopes().into_iter().map(|e| e.event).collect()
    }
}

impl EventSink for RecordingSink {
    fn dispatch_with_correlation(&self, event: FormEvent, cid: CorrelationId) {
        self.envelopes
            .lock()
            .unwrap()
            .push(EventEnvelope::new(cid, event));
    }
}

/// API fake that records calls and answers from canned responses.
#[derive(Default)]
pub struct RecordingApi {
    suggest_queries: Mutex<Vec<SuggestQuery>>,
    submissions: Mutex<Vec<(NewQuestion, Option<String>)>>,
    suggestions: Mutex<SuggestResponse>,
    suggest_failure: Mutex<Option<String>>,
    submit_failure: Mutex<Option<(u16, String)>>,
    submit_gate: Option<Notify>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suggestions(self, response: SuggestResponse) -> Self {
        *self.suggestions.lock().unwrap() = response;
        self
    }

    /// Make every suggestion lookup fail with a network error.
    pub fn failing_suggestions(self, message: &str) -> Self {
        *self.suggest_failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Make every submission fail with the given status.
    pub fn failing_submissions(self, status: u16, status_text: &str) -> Self {
        *self.submit_failure.lock().unwrap() = Some((status, status_text.to_string()));
        self
    }

    /// Park submissions until [`RecordingApi::release_submissions`] is called.
    pub fn hold_submissions(mut self) -> Self {
        self.submit_gate = Some(Notify::new());
        self
    }

    pub fn release_submissions(&self) {
        if let Some(gate) = &self.submit_gate {
            gate.notify_one();
        }
    }

    pub fn suggest_queries(&self) -> Vec<SuggestQuery> {
        self.suggest_queries.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<(NewQuestion, Option<String>)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionApi for RecordingApi {
    async fn search_suggestions(&self, query: SuggestQuery) -> Result<SuggestResponse, ApiError> {
        self.suggest_queries.lock().unwrap().push(query);
        if let Some(message) = self.suggest_failure.lock().unwrap().clone() {
            return Err(ApiError::Network(message));
        }
        Ok(self.suggestions.lock().unwrap().clone())
    }

    async fn create_question(
        &self,
        question: NewQuestion,
        csrf_token: Option<String>,
    ) -> Result<(), ApiError> {
        self.submissions.lock().unwrap().push((question, csrf_token));
        if let Some(gate) = &self.submit_gate {
            gate.notified().await;
        }
        match self.submit_failure.lock().unwrap().clone() {
            Some((status, status_text)) => Err(ApiError::Api {
                status,
                status_text,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }
}
