//! Events posted by the form actions.
//!
//! Events are facts about what the user did or what the server answered.
//! They are serialised with a `type` tag (`SET_PRODUCT`, `SET_TITLE`, ...)
//! so listeners outside the process see the same shape as in-process ones.

use serde::{Deserialize, Serialize};

use crate::suggestion::Suggestion;

/// A product the question is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub slug: String,
    pub title: String,
}

impl Product {
    pub fn new(id: u64, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            title: title.into(),
        }
    }
}

/// A topic within a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: u64,
    pub slug: String,
    pub title: String,
}

impl Topic {
    pub fn new(id: u64, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormEvent {
    SetProduct { product: Product },
    SetTopic { topic: Topic },
    SetTitle { title: String },
    SetSuggestions { suggestions: Vec<Suggestion> },
    SetContent { content: String },
    QuestionSubmitOptimistic,
    QuestionSubmitSuccess,
    QuestionSubmitFailure { error: String },
}

impl FormEvent {
    /// The wire tag of this event.
    pub fn kind(&self) -> &'static str {
        match self {
            FormEvent::SetProduct { .. } => "SET_PRODUCT",
            FormEvent::SetTopic { .. } => "SET_TOPIC",
            FormEvent::SetTitle { .. } => "SET_TITLE",
            FormEvent::SetSuggestions { .. } => "SET_SUGGESTIONS",
            FormEvent::SetContent { .. } => "SET_CONTENT",
            FormEvent::QuestionSubmitOptimistic => "QUESTION_SUBMIT_OPTIMISTIC",
            FormEvent::QuestionSubmitSuccess => "QUESTION_SUBMIT_SUCCESS",
            FormEvent::QuestionSubmitFailure { .. } => "QUESTION_SUBMIT_FAILURE",
        }
    }
}
