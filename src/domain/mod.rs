//! Core domain layer. No external I/O dependencies.
//!
//! Entities, errors and the forecasting engine live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod forecast;

pub use entities::{
    AVG_MONTH_DAYS, ChannelSnapshot, CombinedSeriesPoint, ForecastPoint, HistoryPoint, Milestone,
    RegressionModel, VideoMetric, months_since,
};
pub use errors::DomainError;
pub use forecast::ChannelForecast;
