//! Projection of a fitted trend over a fixed horizon, stitched to the history for charting.

use super::{add_months, round_half_up};
use crate::domain::{CombinedSeriesPoint, ForecastPoint, HistoryPoint, RegressionModel};
use serde::Serialize;

/// Default forecast horizon in months.
pub const DEFAULT_HORIZON_MONTHS: u32 = 6;

/// Forecast points plus the bridge that joins them to the historical line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// Last historical point paired with the model's own fitted value at that x.
    pub bridge: CombinedSeriesPoint,
    pub forecasts: Vec<ForecastPoint>,
}

impl Projection {
    /// Predicted value at the end of the horizon, `None` for an empty horizon.
    pub fn projected_horizon_value(&self) -> Option<i64> {
        self.forecasts.last().map(|f| f.predicted_subscribers)
    }
}

/// Extrapolate `model` for `horizon_months` months past `last`.
///
/// Future x-values step by whole units from `x(last)`; dates step by calendar months.
pub fn project(model: &RegressionModel, last: &HistoryPoint, horizon_months: u32) -> Projection {
    let last_x = model.x_of(last.period_date);

    let forecasts = (1..=horizon_months)
        .map(|i| ForecastPoint {
            period_date: add_months(last.period_date, i),
            predicted_subscribers: round_half_up(model.value_at(last_x + f64::from(i))),
        })
        .collect();

    // The bridge's predicted value is the model at x(last), not the true historical value.
    let bridge = CombinedSeriesPoint {
        date: last.period_date,
        historical: Some(last.estimated_subscribers),
        predicted: Some(round_half_up(model.value_at(last_x))),
    };

    Projection { bridge, forecasts }
}

/// Continuous chart series: history (historical only), the bridge in place of the last
/// history point, then forecasts (predicted only).
pub fn combined_series(history: &[HistoryPoint], projection: &Projection) -> Vec<CombinedSeriesPoint> {
    let mut series = Vec::with_capacity(history.len() + projection.forecasts.len());
    if let Some((_, earlier)) = history.split_last() {
        series.extend(earlier.iter().map(|p| CombinedSeriesPoint {
            date: p.period_date,
            historical: Some(p.estimated_subscribers),
            predicted: None,
        }));
        series.push(projection.bridge);
    }
    series.extend(projection.forecasts.iter().map(|f| CombinedSeriesPoint {
        date: f.period_date,
        historical: None,
        predicted: Some(f.predicted_subscribers),
    }));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn model() -> RegressionModel {
        RegressionModel {
            slope: 1_000.0,
            intercept: 5_000.4,
            origin_date: ymd(2024, 1, 1),
            r_squared: 0.9,
        }
    }

    fn history() -> Vec<HistoryPoint> {
        (1..=6)
            .map(|m| HistoryPoint {
                period_date: ymd(2024, m, 1),
                estimated_subscribers: 4_000 + u64::from(m) * 1_100,
            })
            .collect()
    }

    #[test]
    fn test_forecast_dates_and_values() {
        let m = model();
        let last = *history().last().unwrap();
        let projection = project(&m, &last, DEFAULT_HORIZON_MONTHS);

        assert_eq!(projection.forecasts.len(), 6);
        let dates: Vec<NaiveDate> = projection.forecasts.iter().map(|f| f.period_date).collect();
        assert_eq!(dates[0], ymd(2024, 7, 1));
        assert_eq!(dates[5], ymd(2024, 12, 1));

        let last_x = m.x_of(last.period_date);
        for (i, f) in projection.forecasts.iter().enumerate() {
            let expected = (m.slope * (last_x + (i + 1) as f64) + m.intercept + 0.5).floor() as i64;
            assert_eq!(f.predicted_subscribers, expected);
        }
        assert_eq!(
            projection.projected_horizon_value(),
            Some(projection.forecasts[5].predicted_subscribers)
        );
    }

    #[test]
    fn test_bridge_pairs_history_with_model_value() {
        let m = model();
        let last = *history().last().unwrap();
        let projection = project(&m, &last, 3);

        assert_eq!(projection.bridge.date, last.period_date);
        assert_eq!(projection.bridge.historical, Some(last.estimated_subscribers));
        let fitted = (m.slope * m.x_of(last.period_date) + m.intercept + 0.5).floor() as i64;
        assert_eq!(projection.bridge.predicted, Some(fitted));
        assert!(projection.bridge.is_bridge());
    }

    #[test]
    fn test_combined_series_has_single_bridge() {
        let h = history();
        let projection = project(&model(), h.last().unwrap(), 6);
        let series = combined_series(&h, &projection);

        assert_eq!(series.len(), h.len() + 6);
        assert_eq!(series.iter().filter(|p| p.is_bridge()).count(), 1);
        assert!(series[h.len() - 1].is_bridge());
        assert!(series[..h.len() - 1].iter().all(|p| p.predicted.is_none()));
        assert!(series[h.len()..].iter().all(|p| p.historical.is_none()));
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_month_end_dates_step_by_calendar_month() {
        let last = HistoryPoint {
            period_date: ymd(2024, 11, 1),
            estimated_subscribers: 10,
        };
        let projection = project(&model(), &last, 3);
        let dates: Vec<NaiveDate> = projection.forecasts.iter().map(|f| f.period_date).collect();
        assert_eq!(dates, vec![ymd(2024, 12, 1), ymd(2025, 1, 1), ymd(2025, 2, 1)]);
    }

    #[test]
    fn test_zero_horizon() {
        let h = history();
        let projection = project(&model(), h.last().unwrap(), 0);
        assert!(projection.forecasts.is_empty());
        assert_eq!(projection.projected_horizon_value(), None);
    }
}
