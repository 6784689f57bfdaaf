//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::forecast::ComparisonReport;
use crate::domain::{ChannelForecast, ChannelSnapshot, DomainError, VideoMetric};
use std::path::PathBuf;

/// Analytics API data source. Supplies the engine's only raw input.
///
/// Implementations do not retry; a failed request surfaces as `DomainError::UpstreamFetch`.
#[async_trait::async_trait]
pub trait ChannelDataSource: Send + Sync {
    /// Fetch the channel's current subscriber count.
    async fn fetch_channel(&self, channel_url: &str) -> Result<ChannelSnapshot, DomainError>;

    /// Fetch the channel's videos, normalized into `VideoMetric`s.
    /// Records without a usable publish date keep `published_at: None`.
    async fn fetch_videos(&self, channel_url: &str) -> Result<Vec<VideoMetric>, DomainError>;
}

/// Report port. Persist analysis results for the user (Markdown, CSV).
#[async_trait::async_trait]
pub trait ReportPort: Send + Sync {
    /// Write report files for one channel. Returns the written paths.
    async fn save_forecast(&self, forecast: &ChannelForecast) -> Result<Vec<PathBuf>, DomainError>;

    /// Write a comparison report covering a primary channel and its competitors.
    async fn save_comparison(&self, report: &ComparisonReport) -> Result<PathBuf, DomainError>;
}
