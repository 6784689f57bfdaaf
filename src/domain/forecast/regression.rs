//! Trend fitting with ordinary least squares.
//!
//! x = months since the first history point (30.44-day months), y = estimated subscribers.
//! No weighting, no outlier rejection.

use crate::domain::{DomainError, HistoryPoint, RegressionModel, months_since};

/// Fit `y = slope * x + intercept` over every history point.
///
/// # Errors
/// - `InsufficientData` with fewer than two points
/// - `DegenerateRegression` when all points share the same x (slope undefined)
pub fn fit(history: &[HistoryPoint]) -> Result<RegressionModel, DomainError> {
    if history.len() < 2 {
        return Err(DomainError::InsufficientData {
            points: history.len(),
        });
    }

    let origin_date = history[0].period_date;
    let points: Vec<(f64, f64)> = history
        .iter()
        .map(|p| {
            (
                months_since(origin_date, p.period_date),
                p.estimated_subscribers as f64,
            )
        })
        .collect();

    let first_x = points[0].0;
    if points.iter().all(|p| p.0 == first_x) {
        return Err(DomainError::DegenerateRegression);
    }

    let (slope, intercept, r_squared) = linear_regression(&points);
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(DomainError::DegenerateRegression);
    }

    Ok(RegressionModel {
        slope,
        intercept,
        origin_date,
        r_squared: r_squared.clamp(0.0, 1.0),
    })
}

/// Simple linear regression with R² calculation
///
/// # Returns
/// (slope, intercept, r_squared)
fn linear_regression(points: &[(f64, f64)]) -> (f64, f64, f64) {
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.0).sum();
    let sum_y: f64 = points.iter().map(|p| p.1).sum();
    let sum_xx: f64 = points.iter().map(|p| p.0 * p.0).sum();
    let sum_xy: f64 = points.iter().map(|p| p.0 * p.1).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_tot: f64 = points.iter().map(|p| (p.1 - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|p| (p.1 - (slope * p.0 + intercept)).powi(2))
        .sum();

    let r_squared = if ss_tot > 0.0 {
        1.0 - (ss_res / ss_tot)
    } else {
        0.0
    };

    (slope, intercept, r_squared)
}
