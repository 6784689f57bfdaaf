//! Map raw analytics API records to domain entities.
//!
//! Counters arrive as numbers or numeric strings; missing or malformed values become 0.
//! Publish dates are ISO strings; missing or unparseable dates become `None`.

use crate::domain::{ChannelSnapshot, VideoMetric};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// Counter as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawCount {
    /// Non-negative integer value; negative or non-numeric input maps to 0.
    pub fn to_u64(&self) -> u64 {
        match self {
            RawCount::Int(n) => u64::try_from(*n).unwrap_or(0),
            RawCount::Float(f) if f.is_finite() && *f > 0.0 => f.floor() as u64,
            RawCount::Float(_) => 0,
            RawCount::Text(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| RawCount::Float(f).to_u64()))
                    .unwrap_or(0)
            }
        }
    }
}

/// `GET channel(url)` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChannel {
    #[serde(rename = "subscriberCount", default)]
    pub subscriber_count: Option<RawCount>,
}

/// One entry of `rawMetrics`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVideo {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub views: Option<RawCount>,
    #[serde(default)]
    pub likes: Option<RawCount>,
    #[serde(default)]
    pub comments: Option<RawCount>,
}

/// `GET videos(url)` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVideoList {
    #[serde(rename = "rawMetrics", default)]
    pub raw_metrics: Vec<RawVideo>,
}

pub fn channel_to_domain(raw: &RawChannel) -> ChannelSnapshot {
    ChannelSnapshot {
        current_subscribers: raw.subscriber_count.as_ref().map_or(0, RawCount::to_u64),
    }
}

/// `index` is used as the id when the record has none.
pub fn video_to_domain(raw: &RawVideo, index: usize) -> VideoMetric {
    let id = match &raw.id {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => format!("video-{}", index),
        Some(other) => other.to_string(),
    };
    VideoMetric {
        id,
        published_at: raw.published_at.as_deref().and_then(parse_published_at),
        views: raw.views.as_ref().map_or(0, RawCount::to_u64),
        likes: raw.likes.as_ref().map_or(0, RawCount::to_u64),
        comments: raw.comments.as_ref().map_or(0, RawCount::to_u64),
    }
}

pub fn videos_to_domain(raw: &RawVideoList) -> Vec<VideoMetric> {
    raw.raw_metrics
        .iter()
        .enumerate()
        .map(|(i, v)| video_to_domain(v, i))
        .collect()
}

/// Accepts RFC 3339 (`2024-03-01T12:00:00Z`), naive date-times (UTC assumed) and plain dates.
pub fn parse_published_at(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}
