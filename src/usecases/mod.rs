//! Application use cases. Orchestrate the forecasting engine via ports.

pub mod comparison_service;
pub mod forecast_service;

pub use comparison_service::ComparisonService;
pub use forecast_service::ForecastService;
