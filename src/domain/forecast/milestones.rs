//! Milestone arrival: when the forecast first reaches each unreached subscriber threshold.

use crate::domain::{ForecastPoint, Milestone};
use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Fixed milestone ladder.
pub const CANONICAL_THRESHOLDS: [u64; 7] = [
    100_000, 250_000, 500_000, 1_000_000, 2_500_000, 5_000_000, 10_000_000,
];

/// Milestones reached within the forecast horizon, measured from now.
pub fn milestones(current: u64, forecasts: &[ForecastPoint], thresholds: &[u64]) -> Vec<Milestone> {
    milestones_at(current, forecasts, thresholds, Utc::now())
}

/// For each threshold above `current`, the first forecast month predicted to reach it.
/// Thresholds never reached within the horizon are omitted.
pub fn milestones_at(
    current: u64,
    forecasts: &[ForecastPoint],
    thresholds: &[u64],
    now: DateTime<Utc>,
) -> Vec<Milestone> {
    thresholds
        .iter()
        .copied()
        .filter(|&threshold| threshold > current)
        .filter_map(|threshold| {
            let target = i64::try_from(threshold).unwrap_or(i64::MAX);
            let hit = forecasts.iter().find(|f| f.predicted_subscribers >= target)?;
            Some(Milestone {
                threshold_value: threshold,
                label: milestone_label(threshold),
                projected_date: hit.period_date,
                months_away: months_away(hit.period_date.and_time(NaiveTime::MIN).and_utc(), now),
            })
        })
        .collect()
}

/// `ceil((date - now) / 30 days)`.
fn months_away(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let month_ms = Duration::days(30).num_milliseconds() as f64;
    ((date - now).num_milliseconds() as f64 / month_ms).ceil() as i64
}

/// Compact label: `100K`, `2.5M`, `10M`.
pub fn milestone_label(threshold: u64) -> String {
    if threshold >= 1_000_000 {
        format!("{}M", trim_decimal(threshold as f64 / 1_000_000.0))
    } else if threshold >= 1_000 {
        format!("{}K", trim_decimal(threshold as f64 / 1_000.0))
    } else {
        threshold.to_string()
    }
}

fn trim_decimal(value: f64) -> String {
    let s = format!("{:.1}", value);
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
    }

    fn forecasts(values: &[i64]) -> Vec<ForecastPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ForecastPoint {
                period_date: NaiveDate::from_ymd_opt(2025, 7 + i as u32, 1).unwrap(),
                predicted_subscribers: v,
            })
            .collect()
    }

    #[test]
    fn test_labels() {
        assert_eq!(milestone_label(100_000), "100K");
        assert_eq!(milestone_label(250_000), "250K");
        assert_eq!(milestone_label(1_000_000), "1M");
        assert_eq!(milestone_label(2_500_000), "2.5M");
        assert_eq!(milestone_label(10_000_000), "10M");
    }

    #[test]
    fn test_first_qualifying_month() {
        let f = forecasts(&[90_000, 120_000, 260_000, 300_000]);
        let found = milestones_at(80_000, &f, &CANONICAL_THRESHOLDS, now());

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].threshold_value, 100_000);
        assert_eq!(found[0].label, "100K");
        assert_eq!(found[0].projected_date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        assert_eq!(found[1].threshold_value, 250_000);
        assert_eq!(found[1].projected_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn test_months_away_rounds_up() {
        // 2025-07-01 is 12.5 days after now -> 1 month; 2025-08-01 is 43.5 days -> 2 months.
        let f = forecasts(&[100_000, 250_000]);
        let found = milestones_at(0, &f, &CANONICAL_THRESHOLDS, now());
        assert_eq!(found[0].months_away, 1);
        assert_eq!(found[1].months_away, 2);
    }

    #[test]
    fn test_reached_thresholds_are_skipped() {
        let f = forecasts(&[600_000, 700_000]);
        let found = milestones_at(500_000, &f, &CANONICAL_THRESHOLDS, now());
        assert!(found.is_empty());
    }

    #[test]
    fn test_threshold_equal_to_current_is_skipped() {
        let f = forecasts(&[300_000]);
        let found = milestones_at(250_000, &f, &CANONICAL_THRESHOLDS, now());
        assert!(found.is_empty());
    }

    #[test]
    fn test_unreached_thresholds_are_omitted() {
        let f = forecasts(&[95_000, 99_999]);
        assert!(milestones_at(90_000, &f, &CANONICAL_THRESHOLDS, now()).is_empty());
    }

    #[test]
    fn test_months_away_is_monotonic() {
        let f = forecasts(&[150_000, 400_000, 900_000, 1_600_000, 3_000_000, 6_000_000]);
        let found = milestones_at(120_000, &f, &CANONICAL_THRESHOLDS, now());
        assert_eq!(found.len(), 5);
        assert!(found.windows(2).all(|w| w[0].threshold_value < w[1].threshold_value));
        assert!(found.windows(2).all(|w| w[0].months_away <= w[1].months_away));
    }

    #[test]
    fn test_custom_thresholds() {
        let f = forecasts(&[1_200, 1_900]);
        let found = milestones_at(1_000, &f, &[1_500, 5_000], now());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "1.5K");
    }
}
