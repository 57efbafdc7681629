// Infrastructure seam between the form actions and the support site.
//
// Actions talk to `QuestionApi`; production wires in `KitsuneClient`, tests
// wire in mocks or recording fakes.

use async_trait::async_trait;
use kitsune_api::{KitsuneClient, NewQuestion, SuggestQuery, SuggestResponse};

pub use kitsune_api::ApiError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionApi: Send + Sync {
    async fn search_suggestions(&self, query: SuggestQuery) -> Result<SuggestResponse, ApiError>;

    async fn create_question(
        &self,
        question: NewQuestion,
        csrf_token: Option<String>,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl QuestionApi for KitsuneClient {
    async fn search_suggestions(&self, query: SuggestQuery) -> Result<SuggestResponse, ApiError> {
        KitsuneClient::search_suggestions(self, &query).await
    }

    async fn create_question(
        &self,
        question: NewQuestion,
        csrf_token: Option<String>,
    ) -> Result<(), ApiError> {
        KitsuneClient::create_question(self, &question, csrf_token.as_deref()).await
    }
}
