use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::{document_contains, RenderSession, SessionError, WaitPolicy};

/// Replays saved pages instead of hitting the network.
///
/// Pages come either from an in-memory map keyed by URL or from a directory
/// of `.html` files named after the URL (see [`FixtureSession::file_name`]).
pub struct FixtureSession {
    pages: HashMap<String, String>,
    dir: Option<PathBuf>,
    page: Option<String>,
    closed: bool,
}

impl FixtureSession {
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            pages: HashMap::new(),
            dir: Some(dir.as_ref().to_path_buf()),
            page: None,
            closed: false,
        }
    }

    pub fn from_pages<I, K, V>(pages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pages: pages
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            dir: None,
            page: None,
            closed: false,
        }
    }

    /// `https://host/a/b/?x=1` → `host_a_b__x=1.html`
    pub fn file_name(url: &str) -> String {
        let stripped = url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!("{}.html", stripped.replace(['/', '?'], "_"))
    }

    fn load(&self, url: &str) -> Result<String, SessionError> {
        if let Some(html) = self.pages.get(url) {
            return Ok(html.clone());
        }

        let Some(dir) = &self.dir else {
            return Err(SessionError::MissingFixture {
                url: url.to_string(),
                path: "<memory>".to_string(),
            });
        };

        let path = dir.join(Self::file_name(url));
        if !path.is_file() {
            return Err(SessionError::MissingFixture {
                url: url.to_string(),
                path: path.display().to_string(),
            });
        }
        debug!("Loading fixture {}", path.display());
        Ok(std::fs::read_to_string(&path)?)
    }
}

#[async_trait]
impl RenderSession for FixtureSession {
    async fn navigate(&mut self, url: &str, _wait: WaitPolicy) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        self.page = None;
        self.page = Some(self.load(url)?);
        Ok(())
    }

    async fn click(&mut self, selector: &str, _timeout: Duration) -> Result<(), SessionError> {
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
        self.closed = true;
        self.page = None;
        Ok(())
    }
}
