//! # Ask a Question
//!
//! Action layer for the "Ask a Question" form. User input becomes typed
//! [`FormEvent`]s on an [`EventSink`]; the title field drives a throttled
//! suggestion search, and submission talks to the support site API.
//!
//! ## Architecture
//!
//! ```text
//! UI input
//!     │
//!     ▼
//! QuestionEditActions ──dispatch()──► QuestionStore ──emit()──► EventBus ──► listeners
//!     │        ▲                          │ apply()
//!     │        └── DraftSource::question() ┘
//!     │
//!     ├─► Throttle ─► GET  /api/2/search/suggest ─► SET_SUGGESTIONS
//!     └─────────────► POST /api/2/question/      ─► QUESTION_SUBMIT_*
//! ```
//!
//! The store applies each event before it is broadcast, so the draft read
//! by a submission always includes the edits dispatched before it.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ask_question::{EventBus, QuestionEditActions, QuestionStore, StaticCsrfToken, SuggestSettings};
//! use kitsune_api::KitsuneClient;
//!
//! let bus = EventBus::new();
//! let store = QuestionStore::with_bus(bus.clone());
//!
//! let actions = QuestionEditActions::new(
//!     Arc::new(store.clone()),
//!     Arc::new(KitsuneClient::new("https://support.example.org")),
//!     Arc::new(store.clone()),
//!     Arc::new(StaticCsrfToken::new(token)),
//!     SuggestSettings::default(),
//! );
//!
//! actions.set_title("Firefox crashes on startup");
//! actions.submit_question().await;
//! ```

pub mod actions;
pub mod api;
pub mod bus;
pub mod config;
pub mod csrf;
pub mod draft;
pub mod events;
pub mod suggestion;
pub mod throttle;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use actions::QuestionEditActions;
pub use api::{ApiError, QuestionApi};
pub use bus::{CorrelationId, EventBus, EventEnvelope, EventSink};
pub use config::{Config, SuggestSettings};
pub use csrf::{CsrfTokenSource, PageCsrfToken, StaticCsrfToken};
pub use draft::{DraftSource, QuestionDraft, QuestionStore, StoreState, SubmissionStatus};
pub use events::{FormEvent, Product, Topic};
pub use suggestion::Suggestion;
pub use throttle::{Throttle, ThrottleOutcome};
