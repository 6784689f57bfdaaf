//! Implements ReportPort. Writes reports to a directory on disk.
//!
//! Per channel: `forecast_{slug}_{YYYYMMDD}.md` and `forecast_{slug}_{YYYYMMDD}.csv`.
//! Comparison: `comparison_{slug}_{YYYYMMDD}.md`. Re-running on the same day overwrites.

use super::csv_export::series_to_csv;
use super::markdown::{render_comparison, render_forecast};
use crate::domain::{ChannelForecast, DomainError};
use crate::domain::forecast::ComparisonReport;
use crate::ports::ReportPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Longest slug kept in a file name.
const MAX_SLUG_LEN: usize = 48;

pub struct FsReportWriter {
    reports_dir: PathBuf,
}

impl FsReportWriter {
    pub fn new(reports_dir: impl AsRef<Path>) -> Self {
        Self {
            reports_dir: reports_dir.as_ref().to_path_buf(),
        }
    }

    async fn ensure_dir(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to create reports dir: {}", e)))
    }

    async fn write(&self, filename: String, content: String) -> Result<PathBuf, DomainError> {
        let path = self.reports_dir.join(filename);
        fs::write(&path, content)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to write {}: {}", path.display(), e)))?;
        info!(path = %path.display(), "report written");
        Ok(path)
    }
}

/// File-name-safe form of a channel URL: the last path segment (or host), lowercased,
/// with everything outside `[a-z0-9_-]` replaced by `_`.
pub fn channel_slug(channel_url: &str) -> String {
    let trimmed = channel_url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let tail = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let slug: String = tail
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_SLUG_LEN)
        .collect();
    if slug.trim_matches('_').is_empty() {
        "channel".to_string()
    } else {
        slug
    }
}

#[async_trait::async_trait]
impl ReportPort for FsReportWriter {
    async fn save_forecast(&self, forecast: &ChannelForecast) -> Result<Vec<PathBuf>, DomainError> {
        self.ensure_dir().await?;

        let stem = format!(
            "forecast_{}_{}",
            channel_slug(&forecast.channel_url),
            forecast.generated_at.format("%Y%m%d")
        );
        let csv = series_to_csv(&forecast.series)
            .map_err(|e| DomainError::Report(format!("Failed to generate CSV: {}", e)))?;

        let md_path = self
            .write(format!("{}.md", stem), render_forecast(forecast))
            .await?;
        let csv_path = self.write(format!("{}.csv", stem), csv).await?;
        Ok(vec![md_path, csv_path])
    }

    async fn save_comparison(&self, report: &ComparisonReport) -> Result<PathBuf, DomainError> {
        self.ensure_dir().await?;

        let filename = format!(
            "comparison_{}_{}.md",
            channel_slug(&report.primary.channel_url),
            report.primary.generated_at.format("%Y%m%d")
        );
        self.write(filename, render_comparison(report)).await
    }
}
