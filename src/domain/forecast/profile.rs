//! Channel profile: average views, channel-wide engagement rate and upload cadence.

use crate::domain::{AVG_MONTH_DAYS, VideoMetric};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelProfile {
    pub video_count: usize,
    pub avg_views: f64,
    /// `Σ(likes + comments) / Σviews`, 0 without views.
    pub engagement_rate: f64,
    /// Uploads per average month across the dated span.
    pub upload_frequency: f64,
}

pub fn profile(videos: &[VideoMetric]) -> ChannelProfile {
    let total_views = videos.iter().fold(0u64, |acc, v| acc.saturating_add(v.views));
    let total_engagement = videos.iter().fold(0u64, |acc, v| {
        acc.saturating_add(v.likes.saturating_add(v.comments))
    });

    let avg_views = if videos.is_empty() {
        0.0
    } else {
        total_views as f64 / videos.len() as f64
    };
    let engagement_rate = if total_views > 0 {
        total_engagement as f64 / total_views as f64
    } else {
        0.0
    };

    ChannelProfile {
        video_count: videos.len(),
        avg_views,
        engagement_rate,
        upload_frequency: upload_frequency(videos),
    }
}

/// Fewer than two dated videos give no cadence.
fn upload_frequency(videos: &[VideoMetric]) -> f64 {
    let mut dates: Vec<_> = videos.iter().filter_map(|v| v.published_at).collect();
    if dates.len() < 2 {
        return 0.0;
    }
    dates.sort();
    let span_days = (dates[dates.len() - 1] - dates[0]).num_days() as f64;
    let months_span = (span_days / AVG_MONTH_DAYS).max(1.0);
    videos.len() as f64 / months_span
}
