//! Forecast service. Fetches one channel and runs the forecasting pipeline.

use crate::domain::forecast::run_pipeline;
use crate::domain::{ChannelForecast, DomainError};
use crate::ports::ChannelDataSource;
use std::sync::Arc;
use tracing::info;

/// Creator flow: snapshot + videos for one channel, then the engine.
pub struct ForecastService {
    source: Arc<dyn ChannelDataSource>,
    horizon_months: u32,
}

impl ForecastService {
    /// # Arguments
    /// * `source` - Analytics data source (HTTP or mock)
    /// * `horizon_months` - Number of monthly forecast points to produce
    pub fn new(source: Arc<dyn ChannelDataSource>, horizon_months: u32) -> Self {
        Self {
            source,
            horizon_months,
        }
    }

    /// Fetch the channel snapshot and video list concurrently, then forecast.
    ///
    /// The engine starts only after both fetches succeed; the first failure is returned.
    pub async fn analyze_channel(&self, channel_url: &str) -> Result<ChannelForecast, DomainError> {
        analyze_with(self.source.as_ref(), channel_url, self.horizon_months).await
    }
}

/// Shared by the creator and comparison flows.
pub(crate) async fn analyze_with(
    source: &dyn ChannelDataSource,
    channel_url: &str,
    horizon_months: u32,
) -> Result<ChannelForecast, DomainError> {
    info!(channel = channel_url, horizon_months, "starting analysis");

    let (snapshot, videos) = tokio::try_join!(
        source.fetch_channel(channel_url),
        source.fetch_videos(channel_url)
    )?;

    let forecast = run_pipeline(channel_url, &videos, snapshot, horizon_months)?;

    info!(
        channel = channel_url,
        current = forecast.stats().current,
        horizon_value = ?forecast.stats().projected_horizon_value,
        milestones = forecast.milestones.len(),
        "analysis complete"
    );
    Ok(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::MockDataSource;
    use crate::domain::{ChannelSnapshot, VideoMetric};
    use chrono::{Duration, Utc};

    fn videos(n: i64) -> Vec<VideoMetric> {
        (0..n)
            .map(|i| VideoMetric {
                id: format!("v{}", i),
                published_at: Some(Utc::now() - Duration::days(400 - 30 * i)),
                views: 20_000,
                likes: 800,
                comments: 60,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_analyze_channel() {
        let source = MockDataSource::new().with_delay(0).with_channel(
            "chan",
            ChannelSnapshot {
                current_subscribers: 75_000,
            },
            videos(10),
        );
        let service = ForecastService::new(Arc::new(source), 6);

        let forecast = service.analyze_channel("chan").await.unwrap();

        assert_eq!(forecast.channel_url, "chan");
        assert_eq!(forecast.projection.forecasts.len(), 6);
        assert_eq!(forecast.stats().current, 75_000);
    }

    #[tokio::test]
    async fn test_fetch_failure_stops_pipeline() {
        let source = MockDataSource::new().with_delay(0).with_failure("chan");
        let service = ForecastService::new(Arc::new(source), 6);

        let err = service.analyze_channel("chan").await.unwrap_err();
        assert!(matches!(err, DomainError::UpstreamFetch(_)));
    }

    #[tokio::test]
    async fn test_empty_channel_reports_no_video_data() {
        let source = MockDataSource::new().with_delay(0).with_channel(
            "empty",
            ChannelSnapshot {
                current_subscribers: 10,
            },
            vec![],
        );
        let service = ForecastService::new(Arc::new(source), 6);

        assert_eq!(
            service.analyze_channel("empty").await,
            Err(DomainError::NoVideoData)
        );
    }
}
