//! Analytics API adapter. Implements `ChannelDataSource` over HTTP.
//!
//! `GET {base}{channel_path}?url=<channel>` → `{ subscriberCount }`
//! `GET {base}{videos_path}?url=<channel>`  → `{ rawMetrics: [...] }`
//!
//! No retries: any transport, status or decoding failure is an `UpstreamFetch` error.

use super::mapper::{RawChannel, RawVideoList, channel_to_domain, videos_to_domain};
use crate::domain::{ChannelSnapshot, DomainError, VideoMetric};
use crate::ports::ChannelDataSource;
use crate::shared::config::AppConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct HttpDataSource {
    client: Client,
    base_url: String,
    channel_path: String,
    videos_path: String,
}

impl HttpDataSource {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `base_url` - API root without trailing slash (e.g. "http://127.0.0.1:5000")
    /// * `channel_path` - Path of the channel snapshot endpoint
    /// * `videos_path` - Path of the video list endpoint
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: String,
        channel_path: String,
        videos_path: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            channel_path,
            videos_path,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, DomainError> {
        Self::new(
            cfg.api_base_url_or_default(),
            cfg.channel_path_or_default(),
            cfg.videos_path_or_default(),
            Duration::from_secs(cfg.request_timeout_secs_or_default()),
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        channel_url: &str,
    ) -> Result<T, DomainError> {
        let endpoint = format!("{}{}", self.base_url, path);
        debug!(endpoint = %endpoint, channel = channel_url, "GET");

        let response = self
            .client
            .get(&endpoint)
            .query(&[("url", channel_url)])
            .send()
            .await
            .map_err(|e| DomainError::UpstreamFetch(format!("request to {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, channel = channel_url, "analytics API returned error");
            return Err(DomainError::UpstreamFetch(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::UpstreamFetch(format!("failed to parse {} response: {}", path, e)))
    }
}

#[async_trait::async_trait]
impl ChannelDataSource for HttpDataSource {
    async fn fetch_channel(&self, channel_url: &str) -> Result<ChannelSnapshot, DomainError> {
        let raw: RawChannel = self.get_json(&self.channel_path, channel_url).await?;
        let snapshot = channel_to_domain(&raw);
        info!(
            channel = channel_url,
            subscribers = snapshot.current_subscribers,
            "fetched channel snapshot"
        );
        Ok(snapshot)
    }

    async fn fetch_videos(&self, channel_url: &str) -> Result<Vec<VideoMetric>, DomainError> {
        let raw: RawVideoList = self.get_json(&self.videos_path, channel_url).await?;
        let videos = videos_to_domain(&raw);
        info!(
            channel = channel_url,
            videos = videos.len(),
            dated = videos.iter().filter(|v| v.published_at.is_some()).count(),
            "fetched videos"
        );
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CHANNEL: &str = "https://www.youtube.com/channel/UCabc";

    fn source(server: &MockServer) -> HttpDataSource {
        HttpDataSource::new(
            server.uri(),
            "/api/youtube/channels.list".to_string(),
            "/api/youtube/videos.correlationNetwork".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_channel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/youtube/channels.list"))
            .and(query_param("url", CHANNEL))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"subscriberCount": 4200})),
            )
            .mount(&server)
            .await;

        let snapshot = source(&server).fetch_channel(CHANNEL).await.unwrap();
        assert_eq!(snapshot.current_subscribers, 4_200);
    }

    #[tokio::test]
    async fn test_fetch_videos() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/youtube/videos.correlationNetwork"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "nodes": [],
                "rawMetrics": [
                    {"id": "a", "publishedAt": "2024-01-05T10:00:00Z", "views": 100, "likes": 5, "comments": 1},
                    {"id": "b", "views": 50}
                ]
            })))
            .mount(&server)
            .await;

        let videos = source(&server).fetch_videos(CHANNEL).await.unwrap();
        assert_eq!(videos.len(), 2);
        assert!(videos[0].published_at.is_some());
        assert!(videos[1].published_at.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Channel not found"))
            .expect(1)
            .mount(&server)
            .await;

        let err = source(&server).fetch_channel(CHANNEL).await.unwrap_err();
        match err {
            DomainError::UpstreamFetch(msg) => assert!(msg.contains("404")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_upstream_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = source(&server).fetch_videos(CHANNEL).await.unwrap_err();
        assert!(matches!(err, DomainError::UpstreamFetch(_)));
    }
}
