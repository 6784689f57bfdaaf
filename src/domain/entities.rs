//! Domain entities. Pure data structures for the forecasting engine.
//!
//! No HTTP/IO types here; raw API records are mapped into these by adapters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Average month length used to convert a date difference into "months since origin".
pub const AVG_MONTH_DAYS: f64 = 30.44;

/// A published video with its engagement counters. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetric {
    pub id: String,
    /// `None` when the API record had no (or an unparseable) publish date.
    pub published_at: Option<DateTime<Utc>>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

impl VideoMetric {
    /// `(likes + comments) / views`, or 0 for a video without views.
    pub fn engagement(&self) -> f64 {
        if self.views > 0 {
            self.likes.saturating_add(self.comments) as f64 / self.views as f64
        } else {
            0.0
        }
    }
}

/// Channel-level counters. `current_subscribers` is the terminal value of every history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    pub current_subscribers: u64,
}

/// One month of the reconstructed trajectory. `period_date` is always the first of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub period_date: NaiveDate,
    pub estimated_subscribers: u64,
}

/// Least-squares line over a history. x is months since `origin_date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
    pub origin_date: NaiveDate,
    /// Coefficient of determination in `[0, 1]`. Informational only.
    pub r_squared: f64,
}

impl RegressionModel {
    /// Months between `origin_date` and `date`, using [`AVG_MONTH_DAYS`].
    pub fn x_of(&self, date: NaiveDate) -> f64 {
        months_since(self.origin_date, date)
    }

    /// Raw (unrounded) model value at `x`.
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fractional months from `origin` to `date`.
pub fn months_since(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64 / AVG_MONTH_DAYS
}

/// Predicted value for one future month. May be negative for a declining trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period_date: NaiveDate,
    pub predicted_subscribers: i64,
}

/// Chart row. Exactly one point of a combined series (the bridge) has both values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedSeriesPoint {
    pub date: NaiveDate,
    pub historical: Option<u64>,
    pub predicted: Option<i64>,
}

impl CombinedSeriesPoint {
    pub fn is_bridge(&self) -> bool {
        self.historical.is_some() && self.predicted.is_some()
    }
}

/// A subscriber-count threshold the forecast reaches within the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub threshold_value: u64,
    pub label: String,
    pub projected_date: NaiveDate,
    pub months_away: i64,
}
