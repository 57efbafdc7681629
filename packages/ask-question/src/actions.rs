//! Form actions: turn user input into events, and talk to the support site.
//!
//! Every action posts its event synchronously. Two actions also reach the
//! network:
//!
//! - [`QuestionEditActions::set_title`] triggers a throttled suggestion
//!   search whose result arrives later as `SET_SUGGESTIONS`.
//! - [`QuestionEditActions::submit_question`] posts
//!   `QUESTION_SUBMIT_OPTIMISTIC` before the request starts, then
//!   `QUESTION_SUBMIT_SUCCESS` or `QUESTION_SUBMIT_FAILURE`.
//!
//! Suggestion lookups are never cancelled. A slow response can land after a
//! newer one and overwrite it.

use std::sync::Arc;

use kitsune_api::SuggestQuery;
use tracing::{error, info, warn};

use crate::api::QuestionApi;
use crate::bus::{CorrelationId, EventSink};
use crate::config::SuggestSettings;
use crate::csrf::CsrfTokenSource;
use crate::draft::DraftSource;
use crate::events::{FormEvent, Product, Topic};
use crate::suggestion;
use crate::throttle::{Throttle, ThrottleOutcome};

/// Everything a suggestion lookup needs, shared with the throttle's job.
struct SuggestionSearch {
    sink: Arc<dyn EventSink>,
    api: Arc<dyn QuestionApi>,
    draft: Arc<dyn DraftSource>,
    settings: SuggestSettings,
}

impl SuggestionSearch {
    async fn run(&self, title: String) {
        let query = SuggestQuery {
            q: title,
            max_questions: self.settings.max_questions,
            max_documents: self.settings.max_documents,
            product: self.draft.question().product_slug().map(str::to_string),
        };

        match self.api.search_suggestions(query).await {
            Ok(response) => {
                let suggestions = suggestion::from_response(response);
                self.sink.dispatch(FormEvent::SetSuggestions { suggestions });
            }
            Err(err) => {
                error!(error = %err, "Failed to fetch question suggestions");
            }
        }
    }
}

pub struct QuestionEditActions {
    sink: Arc<dyn EventSink>,
    api: Arc<dyn QuestionApi>,
    draft: Arc<dyn DraftSource>,
    csrf: Arc<dyn CsrfTokenSource>,
    search: Arc<SuggestionSearch>,
    throttled_search: Throttle<String>,
}

impl QuestionEditActions {
    pub fn new(
        sink: Arc<dyn EventSink>,
        api: Arc<dyn QuestionApi>,
        draft: Arc<dyn DraftSource>,
        csrf: Arc<dyn CsrfTokenSource>,
        settings: SuggestSettings,
    ) -> Self {
        let interval = settings.throttle;
        let search = Arc::new(SuggestionSearch {
            sink: Arc::clone(&sink),
            api: Arc::clone(&api),
            draft: Arc::clone(&draft),
            settings,
        });

        let job_search = Arc::clone(&search);
        let throttled_search = Throttle::new(interval, move |title: String| {
            let search = Arc::clone(&job_search);
            async move { search.run(title).await }
        });

        Self {
            sink,
            api,
            draft,
            csrf,
            search,
            throttled_search,
        }
    }

    pub fn set_product(&self, product: Product) {
        self.sink.dispatch(FormEvent::SetProduct { product });
    }

    pub fn set_topic(&self, topic: Topic) {
        self.sink.dispatch(FormEvent::SetTopic { topic });
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.sink.dispatch(FormEvent::SetContent {
            content: content.into(),
        });
    }

    /// Post `SET_TITLE` and schedule a throttled suggestion search.
    ///
    /// The first title in a quiet period is searched at once. Titles set
    /// during the following window collapse into one trailing search for the
    /// latest title when the window closes. The trailing search runs even if
    /// that title equals the one already searched, so a burst of identical
    /// titles costs two requests: one now, one at the end of the window.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_title(&self, title: impl Into<String>) -> ThrottleOutcome {
        let title = title.into();
        self.sink.dispatch(FormEvent::SetTitle {
            title: title.clone(),
        });
        self.throttled_search.call(title)
    }

    /// Run one suggestion search right away, bypassing the throttle.
    pub async fn search_suggestions(&self, title: impl Into<String>) {
        self.search.run(title.into()).await
    }

    /// Submit the current draft.
    ///
    /// The optimistic event is posted before the request is sent; the
    /// outcome follows under the same correlation ID.
    pub async fn submit_question(&self) {
        let cid = CorrelationId::new();
        self.sink
            .dispatch_with_correlation(FormEvent::QuestionSubmitOptimistic, cid);

        let question = self.draft.question().to_new_question();
        let csrf_token = self.csrf.token();
        if csrf_token.is_none() {
            warn!(%cid, "No CSRF token available, submitting without one");
        }

        match self.api.create_question(question, csrf_token).await {
            Ok(()) => {
                info!(%cid, "Question submitted");
                self.sink
                    .dispatch_with_correlation(FormEvent::QuestionSubmitSuccess, cid);
            }
            Err(err) => {
                warn!(%cid, error = %err, "Question submission failed");
                self.sink.dispatch_with_correlation(
                    FormEvent::QuestionSubmitFailure {
                        error: err.status_text(),
                    },
                    cid,
                );
            }
        }
    }
}
