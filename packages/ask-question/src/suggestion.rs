//! Suggestions shown under the title field.

use kitsune_api::{DocumentHit, QuestionHit, SuggestResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Suggestion {
    Document {
        title: String,
        url: String,
        summary: String,
    },
    Question {
        id: u64,
        title: String,
        url: String,
        summary: String,
    },
}

impl Suggestion {
    pub fn title(&self) -> &str {
        match self {
            Suggestion::Document { title, .. } | Suggestion::Question { title, .. } => title,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Suggestion::Document { url, .. } | Suggestion::Question { url, .. } => url,
        }
    }
}

impl From<DocumentHit> for Suggestion {
    fn from(hit: DocumentHit) -> Self {
        Suggestion::Document {
            title: hit.title,
            url: hit.url,
            summary: hit.summary.unwrap_or_default(),
        }
    }
}

impl From<QuestionHit> for Suggestion {
    fn from(hit: QuestionHit) -> Self {
        Suggestion::Question {
            url: format!("/questions/{}", hit.id),
            id: hit.id,
            title: hit.title,
            summary: String::new(),
        }
    }
}

/// Flatten a suggest response: documents first, then questions.
pub fn from_response(response: SuggestResponse) -> Vec<Suggestion> {
    response
        .documents
        .into_iter()
        .map(Suggestion::from)
        .chain(response.questions.into_iter().map(Suggestion::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(title: &str) -> DocumentHit {
        DocumentHit {
            title: title.into(),
            url: format!("/kb/{}", title),
            summary: None,
        }
    }

    fn question(id: u64) -> QuestionHit {
        QuestionHit {
            id,
            title: format!("Question {}", id),
        }
    }

    #[test]
    fn test_documents_come_before_questions() {
        let response = SuggestResponse {
            documents: vec![document("a"), document("b")],
            questions: vec![question(10), question(11), question(12)],
        };

        let suggestions = from_response(response);

        assert_eq!(suggestions.len(), 5);
        assert!(matches!(suggestions[0], Suggestion::Document { .. }));
        assert!(matches!(suggestions[1], Suggestion::Document { .. }));
        assert!(suggestions[2..]
            .iter()
            .all(|s| matches!(s, Suggestion::Question { .. })));
    }

    #[test]
    fn test_question_url_is_derived_and_summary_blank() {
        let suggestions = from_response(SuggestResponse {
            documents: vec![],
            questions: vec![question(42)],
        });

        match &suggestions[0] {
            Suggestion::Question {
                id, url, summary, ..
            } => {
                assert_eq!(*id, 42);
                assert_eq!(url, "/questions/42");
                assert_eq!(summary, "");
            }
            other => panic!("expected question, got {:?}", other),
        }
    }

    #[test]
    fn test_document_keeps_server_url() {
        let suggestions = from_response(SuggestResponse {
            documents: vec![document("crash")],
            questions: vec![],
        });

        assert_eq!(suggestions[0].url(), "/kb/crash");
        assert_eq!(suggestions[0].title(), "crash");
        assert_eq!(
            serde_json::to_value(&suggestions[0]).unwrap()["summary"],
            ""
        );
    }

    #[test]
    fn test_empty_response_gives_empty_list() {
        assert!(from_response(SuggestResponse::default()).is_empty());
    }

    #[test]
    fn test_suggestions_serialize_with_lowercase_type() {
        let value = serde_json::to_value(Suggestion::from(question(1))).unwrap();
        assert_eq!(value["type"], "question");
    }
}
