//! Subscriber growth forecasting engine.
//!
//! Pure pipeline, no I/O: videos → history → regression → projection → {growth, milestones}.
//! Both the creator and the business comparison flows call [`run_pipeline`].

pub mod comparison;
pub mod growth;
pub mod history;
pub mod milestones;
pub mod momentum;
pub mod profile;
pub mod projector;
pub mod regression;

pub use comparison::{
    CatchUp, ComparisonReport, CompetitorOutcome, GrowthRank, catch_up, rank_by_projected_gain,
};
pub use growth::{GrowthAnalysis, GrowthStats, PeriodGrowth, analyze};
pub use history::{reconstruct, reconstruct_at, start_subscribers};
pub use milestones::{CANONICAL_THRESHOLDS, milestone_label, milestones, milestones_at};
pub use momentum::{Direction, Momentum, Risk, momentum};
pub use profile::{ChannelProfile, profile};
pub use projector::{DEFAULT_HORIZON_MONTHS, Projection, combined_series, project};
pub use regression::fit;

use crate::domain::{
    ChannelSnapshot, CombinedSeriesPoint, DomainError, HistoryPoint, Milestone, RegressionModel,
    VideoMetric,
};
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

/// Complete analysis of one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelForecast {
    pub channel_url: String,
    pub history: Vec<HistoryPoint>,
    pub model: RegressionModel,
    pub projection: Projection,
    pub series: Vec<CombinedSeriesPoint>,
    pub growth: GrowthAnalysis,
    pub milestones: Vec<Milestone>,
    pub profile: ChannelProfile,
    pub momentum: Momentum,
    pub generated_at: DateTime<Utc>,
}

impl ChannelForecast {
    pub fn stats(&self) -> &GrowthStats {
        &self.growth.stats
    }

    /// Predicted subscribers gained by the end of the horizon (0 for an empty horizon).
    pub fn projected_gain(&self) -> i64 {
        let stats = self.stats();
        stats
            .projected_horizon_value
            .map(|v| v - stats.current as i64)
            .unwrap_or(0)
    }
}

/// Run the full pipeline for one channel, measured from now.
pub fn run_pipeline(
    channel_url: &str,
    videos: &[VideoMetric],
    snapshot: ChannelSnapshot,
    horizon_months: u32,
) -> Result<ChannelForecast, DomainError> {
    run_pipeline_at(channel_url, videos, snapshot, horizon_months, Utc::now())
}

/// Run the full pipeline with an explicit clock.
///
/// # Errors
/// `NoVideoData`, `NoDatedVideos`, `InsufficientData` or `DegenerateRegression`; no later
/// stage runs after a failure.
pub fn run_pipeline_at(
    channel_url: &str,
    videos: &[VideoMetric],
    snapshot: ChannelSnapshot,
    horizon_months: u32,
    now: DateTime<Utc>,
) -> Result<ChannelForecast, DomainError> {
    if videos.is_empty() {
        return Err(DomainError::NoVideoData);
    }

    let current = snapshot.current_subscribers;
    let history = reconstruct_at(videos, current, now)?;
    let model = fit(&history)?;
    let last = history
        .last()
        .copied()
        .ok_or(DomainError::InsufficientData { points: 0 })?;
    let projection = project(&model, &last, horizon_months);
    let series = combined_series(&history, &projection);
    let growth = analyze(&history, &projection.forecasts)?;
    let milestones = milestones_at(current, &projection.forecasts, &CANONICAL_THRESHOLDS, now);

    debug!(
        channel = channel_url,
        points = history.len(),
        slope = model.slope,
        r_squared = model.r_squared,
        milestones = milestones.len(),
        "pipeline complete"
    );

    Ok(ChannelForecast {
        channel_url: channel_url.to_string(),
        history,
        model,
        projection,
        series,
        growth,
        milestones,
        profile: profile(videos),
        momentum: momentum(videos),
        generated_at: now,
    })
}

/// First day of `date`'s month.
pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Whole calendar months from `from` to `to`, 0 when `to` is earlier.
pub(crate) fn month_diff(from: NaiveDate, to: NaiveDate) -> u32 {
    let months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    u32::try_from(months).unwrap_or(0)
}

/// `date` advanced by `n` calendar months, saturating at the end of the calendar.
pub(crate) fn add_months(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_add_months(Months::new(n))
        .unwrap_or(NaiveDate::MAX)
}

/// Round half toward positive infinity, matching the dashboard's chart values.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
