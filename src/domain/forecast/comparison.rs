//! Cross-channel comparison over independently computed forecasts.

use super::ChannelForecast;
use crate::domain::{DomainError, ForecastPoint};
use chrono::NaiveDate;
use serde::Serialize;

/// One competitor's forecast, or the error that stopped its pipeline.
#[derive(Debug, Clone)]
pub struct CompetitorOutcome {
    pub channel_url: String,
    pub result: Result<ChannelForecast, DomainError>,
}

/// Fan-in of a multi-channel analysis.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub primary: ChannelForecast,
    /// In input order.
    pub competitors: Vec<CompetitorOutcome>,
    /// Primary and every successful competitor.
    pub ranking: Vec<GrowthRank>,
    /// Only competitors currently ahead of the primary.
    pub catch_ups: Vec<CatchUp>,
}

impl ComparisonReport {
    pub fn build(primary: ChannelForecast, competitors: Vec<CompetitorOutcome>) -> Self {
        let succeeded: Vec<&ChannelForecast> = competitors
            .iter()
            .filter_map(|c| c.result.as_ref().ok())
            .collect();
        let ranking = rank_by_projected_gain(std::iter::once(&primary).chain(succeeded.iter().copied()));
        let catch_ups = succeeded
            .iter()
            .filter_map(|c| catch_up(&primary, c))
            .collect();
        Self {
            primary,
            competitors,
            ranking,
            catch_ups,
        }
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &DomainError)> {
        self.competitors
            .iter()
            .filter_map(|c| c.result.as_ref().err().map(|e| (c.channel_url.as_str(), e)))
    }
}

/// Position of a channel when ordered by projected gain over the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthRank {
    pub rank: usize,
    pub channel_url: String,
    pub projected_gain: i64,
}

/// When the primary channel is predicted to overtake a larger competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatchUp {
    pub competitor_url: String,
    pub subscriber_gap: u64,
    /// First forecast month in which the primary reaches the competitor; `None` within the horizon.
    pub month: Option<NaiveDate>,
    pub months_ahead: Option<usize>,
}

/// Rank by `projected_horizon_value - current`, largest gain first. Ties keep input order.
pub fn rank_by_projected_gain<'a, I>(channels: I) -> Vec<GrowthRank>
where
    I: IntoIterator<Item = &'a ChannelForecast>,
{
    let mut gains: Vec<(String, i64)> = channels
        .into_iter()
        .map(|c| (c.channel_url.clone(), c.projected_gain()))
        .collect();
    gains.sort_by(|a, b| b.1.cmp(&a.1));
    gains
        .into_iter()
        .enumerate()
        .map(|(i, (channel_url, projected_gain))| GrowthRank {
            rank: i + 1,
            channel_url,
            projected_gain,
        })
        .collect()
}

/// Catch-up estimate against one competitor. `None` when the primary is not behind.
pub fn catch_up(primary: &ChannelForecast, competitor: &ChannelForecast) -> Option<CatchUp> {
    let primary_now = primary.stats().current;
    let competitor_now = competitor.stats().current;
    if competitor_now <= primary_now {
        return None;
    }

    let crossing = first_crossing(&primary.projection.forecasts, &competitor.projection.forecasts);
    Some(CatchUp {
        competitor_url: competitor.channel_url.clone(),
        subscriber_gap: competitor_now - primary_now,
        month: crossing.map(|(_, date)| date),
        months_ahead: crossing.map(|(i, _)| i + 1),
    })
}

/// Index and date of the first month where `ours >= theirs`, pairing months by date.
fn first_crossing(ours: &[ForecastPoint], theirs: &[ForecastPoint]) -> Option<(usize, NaiveDate)> {
    ours.iter().enumerate().find_map(|(i, p)| {
        theirs
            .iter()
            .find(|t| t.period_date == p.period_date)
            .filter(|t| p.predicted_subscribers >= t.predicted_subscribers)
            .map(|_| (i, p.period_date))
    })
}
