//! Run controller: ties session → scraper → report → storage together.
//!
//! ## One run
//!   1. Every configured results page is loaded, in order, through a single
//!      shared session. A page that fails is logged and skipped.
//!   2. The session is closed, whatever happened in step 1.
//!   3. The collected buckets are rendered and written to the day's file.
//!   Idempotent: re-running against the same pages rewrites the same bytes.

use crate::browser::RenderSession;
use crate::config::AppConfig;
use crate::dates::TargetDay;
use crate::models::CompetitionBucket;
use crate::report::build_report;
use crate::scraper::CompetitionScraper;
use crate::storage::ReportWriter;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

pub struct Pipeline {
    competitions: Vec<String>,
    day: TargetDay,
    scraper: CompetitionScraper,
    writer: ReportWriter,
}

impl Pipeline {
    pub fn new(config: &AppConfig, day: TargetDay) -> Result<Self> {
        Ok(Self {
            competitions: config.competitions.clone(),
            day,
            scraper: CompetitionScraper::new(config, day)
                .context("Failed to build competition scraper")?,
            writer: ReportWriter::new(&config.output),
        })
    }

    pub fn with_writer(mut self, writer: ReportWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Scrape, close the session, render and write. Only a failed write
    /// makes the run fail.
    pub async fn run<S: RenderSession>(&self, mut session: S) -> Result<RunStats> {
        info!(
            "=== Recap for {}: {} competitions ===",
            self.day,
            self.competitions.len()
        );

        let (buckets, failed) = self.scrape_all(&mut session).await;

        if let Err(e) = session.close().await {
            warn!("Closing session failed: {}", e);
        }

        let report = build_report(&buckets, self.day);
        let output = self.writer.write(self.day, &report)?;

        let stats = RunStats {
            attempted: self.competitions.len(),
            failed,
            competitions_reported: buckets.iter().filter(|b| !b.is_empty()).count(),
            matches_reported: buckets.iter().map(|b| b.matches.len()).sum(),
            output,
        };

        info!(
            "=== Done: {} attempted | {} failed | {} competitions | {} results ===",
            stats.attempted, stats.failed, stats.competitions_reported, stats.matches_reported,
        );

        Ok(stats)
    }

    /// One competition at a time; a failure costs that competition only.
    async fn scrape_all<S: RenderSession>(&self, session: &mut S) -> (Vec<CompetitionBucket>, usize) {
        let mut buckets = Vec::with_capacity(self.competitions.len());
        let mut failed = 0usize;

        for url in &self.competitions {
            info!("Fetching {}", url);
            match self.scraper.scrape(&mut *session, url).await {
                Ok(bucket) => buckets.push(bucket),
                Err(e) => {
                    warn!("Competition {} failed: {:#}", url, e);
                    failed += 1;
                }
            }
        }

        (buckets, failed)
    }
}

#[derive(Debug)]
pub struct RunStats {
    pub attempted: usize,
    pub failed: usize,
    pub competitions_reported: usize,
    pub matches_reported: usize,
    pub output: PathBuf,
}
