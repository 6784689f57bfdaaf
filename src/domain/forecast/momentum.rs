//! View momentum over the most recent uploads: direction, stability and a risk label.

use serde::Serialize;
use std::fmt;

use crate::domain::VideoMetric;

/// Number of most recent dated videos considered.
const RECENT_WINDOW: usize = 12;
/// Channels with fewer uploads in total get the neutral result.
const MIN_CHANNEL_VIDEOS: usize = 5;
const MIN_VIDEOS: usize = 3;
/// Slope threshold as a share of mean views per video.
const DIRECTION_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Growing,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Growing => "growing",
            Direction::Stable => "stable",
            Direction::Declining => "declining",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Risk::Low => "low",
            Risk::Medium => "medium",
            Risk::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Momentum {
    pub direction: Direction,
    /// `1 - coefficient of variation` of views, clamped to `[0, 1]`.
    pub stability: f64,
    pub risk: Risk,
    /// Views gained per video across the window.
    pub slope: f64,
}

impl Momentum {
    fn neutral() -> Self {
        Self {
            direction: Direction::Stable,
            stability: 0.5,
            risk: Risk::Medium,
            slope: 0.0,
        }
    }
}

pub fn momentum(videos: &[VideoMetric]) -> Momentum {
    if videos.len() < MIN_CHANNEL_VIDEOS {
        return Momentum::neutral();
    }
    let mut dated: Vec<&VideoMetric> = videos.iter().filter(|v| v.published_at.is_some()).collect();
    dated.sort_by_key(|v| v.published_at);
    let recent = &dated[dated.len().saturating_sub(RECENT_WINDOW)..];
    if recent.len() < MIN_VIDEOS {
        return Momentum::neutral();
    }

    let n = recent.len() as f64;
    let views: Vec<f64> = recent.iter().map(|v| v.views as f64).collect();
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = views.iter().sum::<f64>() / n;

    let numerator: f64 = views
        .iter()
        .enumerate()
        .map(|(i, y)| (i as f64 - x_mean) * (y - y_mean))
        .sum();
    let denominator: f64 = (0..recent.len()).map(|i| (i as f64 - x_mean).powi(2)).sum();
    let slope = if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    };

    let direction = if slope > y_mean * DIRECTION_THRESHOLD {
        Direction::Growing
    } else if slope < -y_mean * DIRECTION_THRESHOLD {
        Direction::Declining
    } else {
        Direction::Stable
    };

    let std_dev = (views.iter().map(|y| (y - y_mean).powi(2)).sum::<f64>() / n).sqrt();
    let cv = if y_mean > 0.0 { std_dev / y_mean } else { 1.0 };
    let stability = (1.0 - cv).clamp(0.0, 1.0);

    let risk = if direction == Direction::Growing && stability > 0.6 {
        Risk::Low
    } else if direction == Direction::Declining || stability < 0.3 {
        Risk::High
    } else {
        Risk::Medium
    };

    Momentum {
        direction,
        stability,
        risk,
        slope,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(views: &[u64]) -> Vec<VideoMetric> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        views
            .iter()
            .enumerate()
            .map(|(i, &v)| VideoMetric {
                id: format!("v{}", i),
                published_at: Some(base + Duration::days(7 * i as i64)),
                views: v,
                likes: 0,
                comments: 0,
            })
            .collect()
    }

    #[test]
    fn test_too_few_videos_is_neutral() {
        let m = momentum(&series(&[100, 200]));
        assert_eq!(m.direction, Direction::Stable);
        assert_eq!(m.risk, Risk::Medium);
        assert_eq!(m.stability, 0.5);
    }

    #[test]
    fn test_small_channel_is_neutral() {
        let m = momentum(&series(&[5_000, 4_000, 3_000, 2_000]));
        assert_eq!(m, Momentum::neutral());
    }

    #[test]
    fn test_undated_videos_count_toward_channel_size() {
        let mut videos = series(&[1_000, 1_100, 1_200]);
        videos.extend((0..2).map(|i| VideoMetric {
            id: format!("undated{}", i),
            published_at: None,
            views: 50,
            likes: 0,
            comments: 0,
        }));
        assert_eq!(momentum(&videos).direction, Direction::Growing);

        // Five uploads but only two dated: still too few to read a trend.
        videos.truncate(2);
        videos.extend((0..3).map(|i| VideoMetric {
            id: format!("late{}", i),
            published_at: None,
            views: 50,
            likes: 0,
            comments: 0,
        }));
        assert_eq!(momentum(&videos), Momentum::neutral());
    }

    #[test]
    fn test_growing_and_steady_is_low_risk() {
        let m = momentum(&series(&[1_000, 1_100, 1_200, 1_300, 1_400]));
        assert_eq!(m.direction, Direction::Growing);
        assert!(m.stability > 0.6);
        assert_eq!(m.risk, Risk::Low);
        assert!((m.slope - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_declining_is_high_risk() {
        let m = momentum(&series(&[5_000, 4_000, 3_000, 2_000, 1_000]));
        assert_eq!(m.direction, Direction::Declining);
        assert_eq!(m.risk, Risk::High);
    }

    #[test]
    fn test_flat_is_stable() {
        let m = momentum(&series(&[700, 700, 700, 700, 700]));
        assert_eq!(m.direction, Direction::Stable);
        assert_eq!(m.stability, 1.0);
        assert_eq!(m.risk, Risk::Medium);
    }

    #[test]
    fn test_only_recent_window_counts() {
        // Old decline followed by twelve steady uploads.
        let mut views = vec![90_000, 60_000, 30_000];
        views.extend(std::iter::repeat(1_000).take(12));
        let m = momentum(&series(&views));
        assert_eq!(m.direction, Direction::Stable);
        assert_eq!(m.stability, 1.0);
    }

    #[test]
    fn test_unordered_input_is_sorted_by_date() {
        let mut videos = series(&[1_000, 1_100, 1_200, 1_300, 1_400]);
        videos.reverse();
        assert_eq!(momentum(&videos).direction, Direction::Growing);
    }
}
