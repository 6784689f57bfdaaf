//! Application configuration. Analytics API endpoint, forecast horizon, paths.

use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CHANNEL_PATH: &str = "/api/youtube/channels.list";
pub const DEFAULT_VIDEOS_PATH: &str = "/api/youtube/videos.correlationNetwork";
/// Upper bound for a configured horizon.
pub const MAX_HORIZON_MONTHS: u32 = 60;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Analytics API base URL. Read from GROWTH_FORECAST_API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Path of the channel snapshot endpoint (`?url=` is appended).
    #[serde(default)]
    pub channel_path: Option<String>,

    /// Path of the video list endpoint (`?url=` is appended).
    #[serde(default)]
    pub videos_path: Option<String>,

    /// HTTP timeout per request in seconds (default 10).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Forecast horizon in months (default 6). Read from GROWTH_FORECAST_HORIZON_MONTHS.
    #[serde(default)]
    pub horizon_months: Option<u32>,

    /// Directory for Markdown/CSV reports (default ./reports).
    #[serde(default)]
    pub reports_dir: Option<String>,

    /// Use the offline mock data source instead of the HTTP API.
    #[serde(default)]
    pub use_mock: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("GROWTH_FORECAST"));
        if let Ok(path) = std::env::var("GROWTH_FORECAST_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the API base URL without a trailing slash.
    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn channel_path_or_default(&self) -> String {
        self.channel_path
            .clone()
            .unwrap_or_else(|| DEFAULT_CHANNEL_PATH.to_string())
    }

    pub fn videos_path_or_default(&self) -> String {
        self.videos_path
            .clone()
            .unwrap_or_else(|| DEFAULT_VIDEOS_PATH.to_string())
    }

    /// Returns the request timeout in seconds. Defaults to 10.
    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(10)
    }

    /// Returns the horizon clamped to `1..=MAX_HORIZON_MONTHS`. Defaults to 6.
    pub fn horizon_months_or_default(&self) -> u32 {
        self.horizon_months
            .unwrap_or(crate::domain::forecast::DEFAULT_HORIZON_MONTHS)
            .clamp(1, MAX_HORIZON_MONTHS)
    }

    pub fn reports_dir_or_default(&self) -> String {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| "./reports".to_string())
    }

    pub fn is_mock(&self) -> bool {
        self.use_mock.unwrap_or(false)
    }
}
