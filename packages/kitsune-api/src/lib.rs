//! Pure support site REST client.
//!
//! A minimal client for the two endpoints the "Ask a Question" form talks to:
//! search suggestions while the user types a title, and question creation on
//! submit.
//!
//! # Example
//!
//! ```rust,ignore
//! use kitsune_api::{KitsuneClient, SuggestQuery};
//!
//! let client = KitsuneClient::new("https://support.example.org");
//!
//! let hits = client.search_suggestions(&SuggestQuery {
//!     q: "firefox crashes on startup".into(),
//!     max_questions: 2,
//!     max_documents: 2,
//!     product: Some("firefox".into()),
//! }).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ApiError, Result};
pub use types::{DocumentHit, NewQuestion, QuestionHit, SuggestQuery, SuggestResponse};

use reqwest::Client;
use tracing::debug;

pub const SUGGEST_PATH: &str = "/api/2/search/suggest";
pub const QUESTION_PATH: &str = "/api/2/question/";

/// Header the server checks the CSRF token against.
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone)]
pub struct KitsuneClient {
    http_client: Client,
    base_url: String,
}

impl KitsuneClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (proxies, timeouts, cookie store).
    pub fn with_http_client(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up documents and questions similar to a title being typed.
    pub async fn search_suggestions(&self, query: &SuggestQuery) -> Result<SuggestResponse> {
        let url = format!("{}{}", self.base_url, SUGGEST_PATH);
        debug!(q = %query.q, product = ?query.product, "Requesting search suggestions");

        let resp = self.http_client.get(&url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, body));
        }

        let text = resp.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Parse(format!("Failed to parse suggestions: {}", e)))
    }

    /// Create a question. The response body is not used.
    pub async fn create_question(
        &self,
        question: &NewQuestion,
        csrf_token: Option<&str>,
    ) -> Result<()> {
        let url = format!("{}{}", self.base_url, QUESTION_PATH);
        debug!(title = %question.title, product = ?question.product, "Creating question");

        let mut request = self.http_client.post(&url).json(question);
        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, body));
        }

        Ok(())
    }
}
