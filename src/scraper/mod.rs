pub mod classifier;
pub mod cleaner;
pub mod parsers;

use crate::browser::{RenderSession, WaitPolicy};
use crate::config::AppConfig;
use crate::dates::TargetDay;
use crate::models::{CompetitionBucket, Side, UNKNOWN_COMPETITION};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, trace};

use self::classifier::RowClassifier;
use self::parsers::{PageSelectors, ResultsPage};

// ── Row capability ────────────────────────────────────────────────────────────

/// Read-only view of one match row. Implementations return `None` for
/// anything they cannot read; callers treat that as empty text.
pub trait MatchRow {
    /// Raw status string the finished marker is searched in.
    fn status(&self) -> Option<String>;
    fn own_date_text(&self) -> Option<String>;
    /// Text of the nearest day/section header above the row.
    fn header_date_text(&self) -> Option<String>;
    fn participant(&self, side: Side) -> Option<String>;
    fn score(&self, side: Side) -> Option<String>;
}

// ── Competition scraper ───────────────────────────────────────────────────────

/// Per-page row tallies, logged at debug level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RowTally {
    pub rows: usize,
    pub finished: usize,
    pub on_day: usize,
    pub kept: usize,
}

pub struct CompetitionScraper {
    selectors: PageSelectors,
    classifier: RowClassifier,
    day: TargetDay,
    consent_button: String,
    consent_timeout: Duration,
    container: String,
    container_timeout: Duration,
}

impl CompetitionScraper {
    pub fn new(config: &AppConfig, day: TargetDay) -> Result<Self> {
        Ok(Self {
            selectors: PageSelectors::compile(&config.selectors)?,
            classifier: RowClassifier::new(&config.selectors.finished_marker, day.tokens()),
            day,
            consent_button: config.selectors.consent_button.clone(),
            consent_timeout: config.session.consent_timeout(),
            container: config.selectors.container.clone(),
            container_timeout: config.session.container_timeout(),
        })
    }

    /// Load one results page and collect the target day's finished games.
    /// Fails only when the page cannot be loaded or the results list never
    /// shows up; a page without qualifying rows yields an empty bucket.
    pub async fn scrape<S>(&self, session: &mut S, url: &str) -> Result<CompetitionBucket>
    where
        S: RenderSession + ?Sized,
    {
        session
            .navigate(url, WaitPolicy::DomContentLoaded)
            .await
            .with_context(|| format!("Failed to load {}", url))?;

        if let Err(e) = session.click(&self.consent_button, self.consent_timeout).await {
            trace!("No consent dialog dismissed on {}: {}", url, e);
        }

        session
            .wait_for(&self.container, self.container_timeout)
            .await
            .with_context(|| format!("Results list missing on {}", url))?;

        let html = session.content()?;
        let (bucket, tally) = self.collect(html, url);

        debug!(
            "{}: {} rows, {} finished, {} on {}, {} kept",
            bucket.name,
            tally.rows,
            tally.finished,
            tally.on_day,
            self.day,
            tally.kept
        );
        info!("{}: {} results", bucket.name, bucket.matches.len());

        Ok(bucket)
    }

    /// Walk the rows of an already rendered page. Kept synchronous so the
    /// parsed document never lives across an await point.
    pub fn collect(&self, html: &str, url: &str) -> (CompetitionBucket, RowTally) {
        let page = ResultsPage::parse(html, &self.selectors);
        let name = page
            .heading()
            .unwrap_or_else(|| UNKNOWN_COMPETITION.to_string());

        let mut bucket = CompetitionBucket::new(name, url);
        let mut tally = RowTally::default();

        for row in page.rows() {
            tally.rows += 1;

            let class = self.classifier.classify(&row);
            if class.finished {
                tally.finished += 1;
            }
            if !class.accepted() {
                continue;
            }
            tally.on_day += 1;

            match cleaner::extract(&row) {
                Some(result) => {
                    tally.kept += 1;
                    bucket.push(result);
                }
                None => trace!("{}: dropped incomplete row", url),
            }
        }

        (bucket, tally)
    }
}

// ── Test support ──────────────────────────────────────────────────────────────
