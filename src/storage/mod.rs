use crate::config::OutputConfig;
use crate::dates::TargetDay;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes one Markdown file per target day.
pub struct ReportWriter {
    dir: PathBuf,
    file_prefix: String,
}

impl ReportWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            file_prefix: config.file_prefix.clone(),
        }
    }

    pub fn with_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = dir.as_ref().to_path_buf();
        self
    }

    /// `<dir>/<prefix>YYYY-MM-DD.md`
    pub fn path_for(&self, day: TargetDay) -> PathBuf {
        self.dir
            .join(format!("{}{}.md", self.file_prefix, day.label()))
    }

    /// Create the directory if needed and overwrite the day's file.
    pub fn write(&self, day: TargetDay, markdown: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.dir))?;

        let path = self.path_for(day);
        std::fs::write(&path, markdown)
            .with_context(|| format!("Failed to write report {:?}", path))?;

        info!("Wrote {} bytes to {}", markdown.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> TargetDay {
        TargetDay::new(NaiveDate::from_ymd_opt(2024, 11, 9).unwrap())
    }

    #[test]
    fn path_embeds_the_day() {
        let writer = ReportWriter::new(&OutputConfig::default());
        assert_eq!(writer.path_for(day()), PathBuf::from("out/recap-2024-11-09.md"));
    }

    #[test]
    fn creates_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(&OutputConfig::default()).with_dir(tmp.path().join("a/b"));

        let path = writer.write(day(), "Daily Recap – 2024-11-09\n").unwrap();
        assert_eq!(path, tmp.path().join("a/b/recap-2024-11-09.md"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Daily Recap – 2024-11-09\n"
        );

        // Re-running the same day overwrites.
        writer.write(day(), "second\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let writer = ReportWriter::new(&OutputConfig::default()).with_dir(blocker.join("out"));
        assert!(writer.write(day(), "x\n").is_err());
    }
}
