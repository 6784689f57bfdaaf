//! History reconstruction. Synthesizes a monthly subscriber series that ends at the
//! channel's current count, shaped by publish cadence and engagement.
//!
//! The growth curve is a fixed heuristic: `progress ^ (0.7 + engagement_boost + views_boost)`.
//! It is reproduced exactly, including the flat/decreasing series produced when the
//! current count is below the synthetic starting point.

use super::{add_months, first_of_month, month_diff};
use crate::domain::{DomainError, HistoryPoint, VideoMetric};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

/// Floor for the synthetic starting subscriber count.
const MIN_START_SUBSCRIBERS: u64 = 10;
/// Share of the current count the trajectory starts from.
const START_FRACTION: f64 = 0.15;
const BASE_EXPONENT: f64 = 0.7;
const MAX_ENGAGEMENT_BOOST: f64 = 0.5;
const MAX_VIEWS_BOOST: f64 = 0.3;
/// Cumulative views at which the views boost saturates.
const VIEWS_BOOST_SCALE: f64 = 5_000_000.0;

/// Starting point of every reconstructed trajectory: `max(10, floor(current * 0.15))`.
pub fn start_subscribers(current_subscribers: u64) -> u64 {
    ((current_subscribers as f64 * START_FRACTION).floor() as u64).max(MIN_START_SUBSCRIBERS)
}

/// Reconstruct history ending at the first of the current month.
pub fn reconstruct(
    videos: &[VideoMetric],
    current_subscribers: u64,
) -> Result<Vec<HistoryPoint>, DomainError> {
    reconstruct_at(videos, current_subscribers, Utc::now())
}

/// Reconstruct history with an explicit clock. The last point is the first of `now`'s month
/// and always carries exactly `current_subscribers`.
pub fn reconstruct_at(
    videos: &[VideoMetric],
    current_subscribers: u64,
    now: DateTime<Utc>,
) -> Result<Vec<HistoryPoint>, DomainError> {
    let mut dated: Vec<(DateTime<Utc>, &VideoMetric)> = videos
        .iter()
        .filter_map(|v| v.published_at.map(|at| (at, v)))
        .collect();
    if dated.is_empty() {
        return Err(DomainError::NoDatedVideos);
    }
    dated.sort_by_key(|(at, _)| *at);

    let last_date = first_of_month(now.date_naive());
    // A publish date in a future month collapses the history onto the current month.
    let first_date = first_of_month(dated[0].0.date_naive()).min(last_date);
    let months_diff = month_diff(first_date, last_date);

    let start = start_subscribers(current_subscribers);
    let total_growth = current_subscribers as i64 - start as i64;

    debug!(
        videos = dated.len(),
        months_diff,
        start,
        total_growth,
        "reconstructing subscriber history"
    );

    let mut history = Vec::with_capacity(months_diff as usize + 1);
    // Running totals over the sorted prefix of videos published up to the current month.
    let mut included = 0usize;
    let mut engagement_sum = 0.0f64;
    let mut views_sum = 0u64;

    for month_index in 0..=months_diff {
        let current_date = add_months(first_date, month_index);
        let cutoff = month_start_utc(current_date);

        while included < dated.len() && dated[included].0 <= cutoff {
            let video = dated[included].1;
            engagement_sum += video.engagement();
            views_sum = views_sum.saturating_add(video.views);
            included += 1;
        }

        let estimated_subscribers = if included == 0 {
            start
        } else {
            let avg_engagement = engagement_sum / included as f64;
            let progress = f64::from(month_index) / f64::from(months_diff.max(1));
            let engagement_boost = (avg_engagement * 2.0).min(MAX_ENGAGEMENT_BOOST);
            let views_boost = (views_sum as f64 / VIEWS_BOOST_SCALE).min(MAX_VIEWS_BOOST);
            let growth_curve = progress.powf(BASE_EXPONENT + engagement_boost + views_boost);
            let estimate = (start as f64 + total_growth as f64 * growth_curve).floor();
            estimate.min(current_subscribers as f64).max(0.0) as u64
        };

        history.push(HistoryPoint {
            period_date: current_date,
            estimated_subscribers,
        });
    }

    if let Some(last) = history.last_mut() {
        last.estimated_subscribers = current_subscribers;
    }

    Ok(history)
}

/// Midnight UTC at the start of `date`.
fn month_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
