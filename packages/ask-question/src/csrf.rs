//! CSRF token sources for the submission request.

use scraper::{Html, Selector};

/// Name of the hidden form field holding the token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

pub trait CsrfTokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A token known up front (from config or a cookie).
#[derive(Debug, Clone, Default)]
pub struct StaticCsrfToken(Option<String>);

impl StaticCsrfToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticCsrfToken {
    fn from(token: Option<String>) -> Self {
        Self(token)
    }
}

impl CsrfTokenSource for StaticCsrfToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Token read from the hidden field of a rendered form page.
#[derive(Debug, Clone)]
pub struct PageCsrfToken {
    token: Option<String>,
}

impl PageCsrfToken {
    pub fn from_html(html: &str) -> Self {
        Self {
            token: extract_from_html(html),
        }
    }
}

impl CsrfTokenSource for PageCsrfToken {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Find the `csrfmiddlewaretoken` input and return its value.
pub fn extract_from_html(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("input[name={}]", CSRF_FIELD)).ok()?;

    document
        .select(&selector)
        .filter_map(|input| input.value().attr("value"))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
