//! Domain errors. Used by ports, the forecast engine and use cases.
//!
//! Adapters map infrastructure errors into these. Every variant is recoverable:
//! the UI renders the message and returns to the menu.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No video data: the channel has no published videos to analyze")]
    NoVideoData,

    #[error("No dated videos: none of the channel's videos carry a publish date")]
    NoDatedVideos,

    /// Trend fitting needs at least two monthly history points.
    #[error("Insufficient data: {points} history point(s), at least 2 are required")]
    InsufficientData { points: usize },

    /// All history points share the same x-value, so the OLS slope is undefined.
    #[error("Degenerate regression: all history points fall on the same month")]
    DegenerateRegression,

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report export failed: {0}")]
    Report(String),

    /// Terminal prompt failure other than a user cancel.
    #[error("Input error: {0}")]
    Input(String),

    /// A per-channel analysis task panicked or was aborted.
    #[error("Analysis task failed: {0}")]
    Task(String),
}
