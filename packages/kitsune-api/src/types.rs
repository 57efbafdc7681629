use serde::{Deserialize, Serialize};

/// Query for the search suggestion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestQuery {
    pub q: String,
    pub max_questions: u32,
    pub max_documents: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

/// Response body of the search suggestion endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub documents: Vec<DocumentHit>,
    #[serde(default)]
    pub questions: Vec<QuestionHit>,
}

/// A knowledge base article matching the query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentHit {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub summary: Option<String>,
}

/// An existing question matching the query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionHit {
    pub id: u64,
    pub title: String,
}

/// Body of the question creation endpoint.
///
/// `product` and `topic` are slugs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewQuestion {
    pub product: Option<String>,
    pub topic: Option<String>,
    pub title: String,
    pub content: String,
}
