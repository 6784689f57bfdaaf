//! Comparison service. Fan-out one analysis per channel, fan-in into a ComparisonReport.

use super::forecast_service::analyze_with;
use crate::domain::{ChannelForecast, DomainError};
use crate::domain::forecast::{ComparisonReport, CompetitorOutcome};
use crate::ports::ChannelDataSource;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Business flow: a primary channel against any number of competitors.
pub struct ComparisonService {
    source: Arc<dyn ChannelDataSource>,
    horizon_months: u32,
}

impl ComparisonService {
    pub fn new(source: Arc<dyn ChannelDataSource>, horizon_months: u32) -> Self {
        Self {
            source,
            horizon_months,
        }
    }

    /// Analyze every channel concurrently. Pipelines are independent and share no state.
    ///
    /// A failing competitor is reported in its `CompetitorOutcome`; a failing primary fails
    /// the whole comparison. Dropping the returned future aborts all in-flight analyses.
    pub async fn compare(
        &self,
        primary_url: &str,
        competitor_urls: &[String],
    ) -> Result<ComparisonReport, DomainError> {
        info!(
            primary = primary_url,
            competitors = competitor_urls.len(),
            "starting comparison"
        );

        let urls: Vec<String> = std::iter::once(primary_url.to_string())
            .chain(competitor_urls.iter().cloned())
            .collect();

        let mut set = JoinSet::new();
        for (index, url) in urls.iter().cloned().enumerate() {
            let source = Arc::clone(&self.source);
            let horizon = self.horizon_months;
            set.spawn(async move {
                let result = analyze_with(source.as_ref(), &url, horizon).await;
                (index, result)
            });
        }

        let mut results: Vec<Option<Result<ChannelForecast, DomainError>>> =
            vec![None; urls.len()];
        while let Some(joined) = set.join_next().await {
            let (index, result) = joined.map_err(|e| DomainError::Task(e.to_string()))?;
            if let Err(e) = &result {
                warn!(channel = %urls[index], error = %e, "channel analysis failed");
            }
            results[index] = Some(result);
        }

        let mut outcomes = urls.into_iter().zip(results).map(|(url, result)| {
            let result = result
                .unwrap_or_else(|| Err(DomainError::Task(format!("no result for {}", url))));
            (url, result)
        });

        let primary = match outcomes.next() {
            Some((_, result)) => result?,
            None => return Err(DomainError::Task("primary analysis missing".to_string())),
        };
        let competitors: Vec<CompetitorOutcome> = outcomes
            .map(|(channel_url, result)| CompetitorOutcome {
                channel_url,
                result,
            })
            .collect();

        let report = ComparisonReport::build(primary, competitors);
        info!(
            ranked = report.ranking.len(),
            catch_ups = report.catch_ups.len(),
            failed = report.failed().count(),
            "comparison complete"
        );
        Ok(report)
    }
}
