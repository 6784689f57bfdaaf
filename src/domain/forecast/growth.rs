//! Growth analytics: per-period growth rate and velocity, plus summary statistics.

use super::round_half_up;
use crate::domain::{DomainError, ForecastPoint, HistoryPoint};
use chrono::NaiveDate;
use serde::Serialize;

/// Change between two consecutive history points, dated at the later one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodGrowth {
    pub date: NaiveDate,
    /// Percent change over the previous point; 0 when the previous value is 0.
    pub growth_rate_pct: f64,
    pub gained: i64,
}

/// KPI figures for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthStats {
    pub current: u64,
    pub total_growth: i64,
    pub avg_growth_rate_pct: f64,
    /// Mean subscribers gained per month, rounded.
    pub avg_velocity: i64,
    pub projected_horizon_value: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthAnalysis {
    pub per_period: Vec<PeriodGrowth>,
    pub stats: GrowthStats,
}

/// Derive growth figures from a history and its forecast.
pub fn analyze(
    history: &[HistoryPoint],
    forecasts: &[ForecastPoint],
) -> Result<GrowthAnalysis, DomainError> {
    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(DomainError::InsufficientData { points: 0 }),
    };

    let per_period: Vec<PeriodGrowth> = history
        .windows(2)
        .map(|w| {
            let prev = w[0].estimated_subscribers;
            let curr = w[1].estimated_subscribers;
            let gained = curr as i64 - prev as i64;
            let growth_rate_pct = if prev > 0 {
                gained as f64 / prev as f64 * 100.0
            } else {
                0.0
            };
            PeriodGrowth {
                date: w[1].period_date,
                growth_rate_pct,
                gained,
            }
        })
        .collect();

    let (avg_growth_rate_pct, avg_velocity) = if per_period.is_empty() {
        (0.0, 0)
    } else {
        let n = per_period.len() as f64;
        let rate_sum: f64 = per_period.iter().map(|p| p.growth_rate_pct).sum();
        let gained_sum: i64 = per_period.iter().map(|p| p.gained).sum();
        (rate_sum / n, round_half_up(gained_sum as f64 / n))
    };

    let stats = GrowthStats {
        current: last.estimated_subscribers,
        total_growth: last.estimated_subscribers as i64 - first.estimated_subscribers as i64,
        avg_growth_rate_pct,
        avg_velocity,
        projected_horizon_value: forecasts.last().map(|f| f.predicted_subscribers),
    };

    Ok(GrowthAnalysis { per_period, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: u32, value: u64) -> HistoryPoint {
        HistoryPoint {
            period_date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            estimated_subscribers: value,
        }
    }

    #[test]
    fn test_per_period_rates() {
        let history = [point(1, 100), point(2, 150), point(3, 120)];
        let analysis = analyze(&history, &[]).unwrap();

        assert_eq!(analysis.per_period.len(), 2);
        assert_eq!(analysis.per_period[0].gained, 50);
        assert!((analysis.per_period[0].growth_rate_pct - 50.0).abs() < 1e-9);
        assert_eq!(analysis.per_period[1].gained, -30);
        assert!((analysis.per_period[1].growth_rate_pct + 20.0).abs() < 1e-9);
        assert_eq!(analysis.per_period[1].date, history[2].period_date);
    }

    #[test]
    fn test_stats() {
        let history = [point(1, 100), point(2, 150), point(3, 125)];
        let forecasts = [ForecastPoint {
            period_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            predicted_subscribers: 140,
        }];
        let stats = analyze(&history, &forecasts).unwrap().stats;

        assert_eq!(stats.current, 125);
        assert_eq!(stats.total_growth, 25);
        // (50 + (-16.666..)) / 2
        assert!((stats.avg_growth_rate_pct - (50.0 - 100.0 / 6.0) / 2.0).abs() < 1e-9);
        // (50 - 25) / 2 = 12.5 rounds half up
        assert_eq!(stats.avg_velocity, 13);
        assert_eq!(stats.projected_horizon_value, Some(140));
    }

    #[test]
    fn test_zero_previous_value_has_zero_rate() {
        let history = [point(1, 0), point(2, 10)];
        let analysis = analyze(&history, &[]).unwrap();
        assert_eq!(analysis.per_period[0].growth_rate_pct, 0.0);
        assert_eq!(analysis.per_period[0].gained, 10);
    }

    #[test]
    fn test_single_point_has_no_periods() {
        let analysis = analyze(&[point(1, 42)], &[]).unwrap();
        assert!(analysis.per_period.is_empty());
        assert_eq!(analysis.stats.avg_velocity, 0);
        assert_eq!(analysis.stats.avg_growth_rate_pct, 0.0);
        assert_eq!(analysis.stats.total_growth, 0);
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(
            analyze(&[], &[]),
            Err(DomainError::InsufficientData { points: 0 })
        );
    }
}
