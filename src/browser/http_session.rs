use crate::config::SessionConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, trace};

use super::{document_contains, RenderSession, SessionError, WaitPolicy};

/// Session over plain HTTP. It sees server-rendered markup only: the page
/// is a static snapshot, so anything absent after the load never appears.
pub struct HttpSession {
    inner: Option<reqwest::Client>,
    page: Option<String>,
}

impl HttpSession {
    pub fn open(config: &SessionConfig) -> Result<Self, SessionError> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.navigation_timeout())
            .gzip(true)
            // Accept cookies so consent state survives between pages
            .cookie_store(true)
            .build()
            .map_err(SessionError::Open)?;

        Ok(Self {
            inner: Some(inner),
            page: None,
        })
    }

    fn client(&self) -> Result<&reqwest::Client, SessionError> {
        self.inner.as_ref().ok_or(SessionError::Closed)
    }
}

#[async_trait]
impl RenderSession for HttpSession {
    async fn navigate(&mut self, url: &str, wait: WaitPolicy) -> Result<(), SessionError> {
        debug!("GET {} ({:?})", url, wait);
        self.page = None;

        let resp = self
            .client()?
            .get(url)
            .send()
            .await
            .map_err(|source| SessionError::Navigation {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SessionError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.text().await.map_err(|source| SessionError::Navigation {
            url: url.to_string(),
            source,
        })?;
        trace!("{}: {} bytes", url, body.len());

        self.page = Some(body);
        Ok(())
    }

    async fn click(&mut self, selector: &str, _timeout: Duration) -> Result<(), SessionError> {
        // Nothing to interact with in a static document; succeed if the
        // target exists so callers see the same contract as a live browser.
        if document_contains(self.content()?, selector)? {
            Ok(())
        } else {
            Err(SessionError::ElementNotFound {
                selector: selector.to_string(),
            })
        }
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), SessionError> {
        if document_contains(self.content()?, selector)? {
            Ok(())
        } else {
            Err(SessionError::Timeout {
                selector: selector.to_string(),
                timeout,
            })
        }
    }

    fn content(&self) -> Result<&str, SessionError> {
        self.page.as_deref().ok_or(SessionError::NoPage)
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.page = None;
        self.inner = None;
        Ok(())
    }
}
