//! Page-rendering session abstraction.
//!
//! The scraper never talks to a transport directly. It drives a
//! [`RenderSession`] (navigate, click, wait, read the current DOM) and does
//! all element-level work on the HTML snapshot that [`RenderSession::content`]
//! hands back.

pub mod fixture_session;
pub mod http_session;

use async_trait::async_trait;
use std::time::Duration;

pub use self::fixture_session::FixtureSession;
pub use self::http_session::HttpSession;

/// How long `navigate` waits before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Return once the initial document is available.
    DomContentLoaded,
    /// Return once background requests have settled.
    NetworkIdle,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to start session: {0}")]
    Open(reqwest::Error),

    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        source: reqwest::Error,
    },

    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("`{selector}` did not appear within {timeout:?}")]
    Timeout { selector: String, timeout: Duration },

    #[error("no element matches `{selector}`")]
    ElementNotFound { selector: String },

    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("no page loaded")]
    NoPage,

    #[error("session is closed")]
    Closed,

    #[error("no fixture for {url} (expected {path})")]
    MissingFixture { url: String, path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One browser-like session, shared by every competition in a run.
#[async_trait]
pub trait RenderSession: Send {
    async fn navigate(&mut self, url: &str, wait: WaitPolicy) -> Result<(), SessionError>;

    async fn click(&mut self, selector: &str, timeout: Duration) -> Result<(), SessionError>;

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), SessionError>;

    /// Serialized DOM of the current page.
    fn content(&self) -> Result<&str, SessionError>;

    async fn close(&mut self) -> Result<(), SessionError>;
}

/// True if `selector` matches anything in `html`. The parsed document is
/// dropped before returning so callers can hold the result across awaits.
pub(crate) fn document_contains(html: &str, selector: &str) -> Result<bool, SessionError> {
    let sel = ::scraper::Selector::parse(selector).map_err(|e| SessionError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })?;
    let doc = ::scraper::Html::parse_document(html);
    let found = doc.select(&sel).next().is_some();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_finds_nested_elements() {
        let html = r#"<html><body><div class="sportName baseball"><p>x</p></div></body></html>"#;
        assert!(document_contains(html, ".sportName").unwrap());
        assert!(!document_contains(html, ".event__match").unwrap());
    }

    #[test]
    fn contains_rejects_bad_selector() {
        assert!(matches!(
            document_contains("<p></p>", "p["),
            Err(SessionError::Selector { .. })
        ));
    }
}
