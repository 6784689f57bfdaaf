//! Mock data source for offline runs and tests.
//!
//! Serves registered fixtures; in demo mode, unknown channels get a deterministic synthetic
//! upload history derived from the URL. Simulates network latency with a configurable delay.

use crate::domain::{ChannelSnapshot, DomainError, VideoMetric};
use crate::ports::ChannelDataSource;
use chrono::{Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
struct Fixture {
    snapshot: ChannelSnapshot,
    videos: Vec<VideoMetric>,
}

pub struct MockDataSource {
    fixtures: HashMap<String, Fixture>,
    /// Channels whose fetches fail with `UpstreamFetch`.
    failing: Vec<String>,
    demo: bool,
    delay_ms: u64,
}

impl MockDataSource {
    /// Empty source with the default delay (100ms).
    pub fn new() -> Self {
        Self {
            fixtures: HashMap::new(),
            failing: Vec::new(),
            demo: false,
            delay_ms: 100,
        }
    }

    /// Source that synthesizes a channel for any unregistered URL.
    pub fn demo() -> Self {
        Self {
            demo: true,
            ..Self::new()
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_channel(
        mut self,
        channel_url: &str,
        snapshot: ChannelSnapshot,
        videos: Vec<VideoMetric>,
    ) -> Self {
        self.fixtures
            .insert(channel_url.to_string(), Fixture { snapshot, videos });
        self
    }

    pub fn with_failure(mut self, channel_url: &str) -> Self {
        self.failing.push(channel_url.to_string());
        self
    }

    async fn lookup(&self, channel_url: &str) -> Result<Fixture, DomainError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if self.failing.iter().any(|u| u == channel_url) {
            return Err(DomainError::UpstreamFetch(format!(
                "[MOCK] simulated failure for {}",
                channel_url
            )));
        }
        if let Some(fixture) = self.fixtures.get(channel_url) {
            return Ok(fixture.clone());
        }
        if self.demo {
            return Ok(synthesize(channel_url));
        }
        Err(DomainError::UpstreamFetch(format!(
            "[MOCK] channel not found: {}",
            channel_url
        )))
    }
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChannelDataSource for MockDataSource {
    async fn fetch_channel(&self, channel_url: &str) -> Result<ChannelSnapshot, DomainError> {
        info!(channel = channel_url, "[MOCK] fetching channel snapshot");
        Ok(self.lookup(channel_url).await?.snapshot)
    }

    async fn fetch_videos(&self, channel_url: &str) -> Result<Vec<VideoMetric>, DomainError> {
        info!(channel = channel_url, "[MOCK] fetching videos");
        Ok(self.lookup(channel_url).await?.videos)
    }
}

/// Deterministic demo channel: size, cadence and reach vary with the URL bytes.
fn synthesize(channel_url: &str) -> Fixture {
    let seed = channel_url
        .bytes()
        .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    let subscribers = 5_000 + seed % 900_000;
    let video_count = 8 + (seed % 30) as i64;
    let spacing_days = 10 + (seed % 20) as i64;
    let base_views = 2_000 + seed % 80_000;

    let now = Utc::now();
    let videos = (0..video_count)
        .map(|i| {
            let views = base_views + (i as u64) * (base_views / 10);
            VideoMetric {
                id: format!("demo-{}", i),
                published_at: Some(now - ChronoDuration::days((video_count - i) * spacing_days)),
                views,
                likes: views / 25,
                comments: views / 300,
            }
        })
        .collect();

    Fixture {
        snapshot: ChannelSnapshot {
            current_subscribers: subscribers,
        },
        videos,
    }
}
