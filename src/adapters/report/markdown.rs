//! Markdown rendering of forecasts and comparisons.

use crate::domain::ChannelForecast;
use crate::domain::forecast::ComparisonReport;

/// Thousands separators for subscriber counts ("1,234,567").
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

pub fn render_forecast(forecast: &ChannelForecast) -> String {
    let stats = forecast.stats();
    let mut md = String::new();

    md.push_str(&format!("# Growth Forecast: {}\n\n", forecast.channel_url));
    md.push_str(&format!(
        "**Generated:** {} | **Horizon:** {} months | **Fit R²:** {:.3}\n\n",
        forecast.generated_at.format("%Y-%m-%d %H:%M UTC"),
        forecast.projection.forecasts.len(),
        forecast.model.r_squared
    ));
    md.push_str("---\n\n");

    md.push_str("## 📊 Key Metrics\n\n");
    md.push_str("| Metric | Value |\n|---|---|\n");
    md.push_str(&format!(
        "| Current subscribers | {} |\n",
        group_thousands(stats.current as i64)
    ));
    md.push_str(&format!(
        "| Total growth | {} |\n",
        group_thousands(stats.total_growth)
    ));
    md.push_str(&format!(
        "| Avg monthly growth | {:.2}% |\n",
        stats.avg_growth_rate_pct
    ));
    md.push_str(&format!(
        "| Avg velocity | {} / month |\n",
        group_thousands(stats.avg_velocity)
    ));
    let horizon = stats
        .projected_horizon_value
        .map(group_thousands)
        .unwrap_or_else(|| "n/a".to_string());
    md.push_str(&format!("| Projected at horizon | {} |\n\n", horizon));

    md.push_str("## 📈 Series\n\n");
    md.push_str("| Month | Historical | Predicted |\n|---|---|---|\n");
    for point in &forecast.series {
        let historical = point
            .historical
            .map(|v| group_thousands(v as i64))
            .unwrap_or_default();
        let predicted = point.predicted.map(group_thousands).unwrap_or_default();
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            point.date.format("%Y-%m"),
            historical,
            predicted
        ));
    }
    md.push('\n');

    md.push_str("## 🏁 Milestones\n\n");
    if forecast.milestones.is_empty() {
        md.push_str("No milestone is reached within the forecast horizon.\n\n");
    } else {
        for m in &forecast.milestones {
            md.push_str(&format!(
                "- **{}** on {} ({} months away)\n",
                m.label,
                m.projected_date.format("%Y-%m-%d"),
                m.months_away
            ));
        }
        md.push('\n');
    }

    md.push_str("## 🎬 Channel Profile\n\n");
    md.push_str(&format!(
        "- Videos: {}\n- Avg views: {:.0}\n- Engagement rate: {:.2}%\n- Uploads per month: {:.1}\n",
        forecast.profile.video_count,
        forecast.profile.avg_views,
        forecast.profile.engagement_rate * 100.0,
        forecast.profile.upload_frequency
    ));
    md.push_str(&format!(
        "- View momentum: {} (stability {:.2}, risk {})\n\n",
        forecast.momentum.direction, forecast.momentum.stability, forecast.momentum.risk
    ));

    md.push_str("---\n");
    md.push_str("*Generated by growth-forecast*\n");
    md
}

pub fn render_comparison(report: &ComparisonReport) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# Competitive Growth Comparison: {}\n\n",
        report.primary.channel_url
    ));
    md.push_str(&format!(
        "**Generated:** {} | **Competitors:** {}\n\n",
        report.primary.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.competitors.len()
    ));
    md.push_str("---\n\n");

    md.push_str("## 🏆 Ranking by Projected Gain\n\n");
    md.push_str("| Rank | Channel | Projected gain |\n|---|---|---|\n");
    for r in &report.ranking {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            r.rank,
            r.channel_url,
            group_thousands(r.projected_gain)
        ));
    }
    md.push('\n');

    if !report.catch_ups.is_empty() {
        md.push_str("## 🎯 Catch-up Estimates\n\n");
        for c in &report.catch_ups {
            let when = match (c.month, c.months_ahead) {
                (Some(month), Some(ahead)) => {
                    format!("overtaken in {} ({} months)", month.format("%Y-%m"), ahead)
                }
                _ => "not overtaken within the horizon".to_string(),
            };
            md.push_str(&format!(
                "- **{}**: gap {}, {}\n",
                c.competitor_url,
                group_thousands(c.subscriber_gap as i64),
                when
            ));
        }
        md.push('\n');
    }

    let failed: Vec<_> = report.failed().collect();
    if !failed.is_empty() {
        md.push_str("## ⚠️ Not Analyzed\n\n");
        for (url, err) in failed {
            md.push_str(&format!("- {}: {}\n", url, err));
        }
        md.push('\n');
    }

    md.push_str("---\n");
    md.push_str("*Generated by growth-forecast*\n");
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::{CompetitorOutcome, run_pipeline_at};
    use crate::domain::{ChannelSnapshot, DomainError, VideoMetric};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
    }

    fn forecast(url: &str, subscribers: u64) -> ChannelForecast {
        let videos: Vec<VideoMetric> = (0..4)
            .map(|i| VideoMetric {
                id: format!("{}-{}", url, i),
                published_at: Some(now() - Duration::days(365 - 90 * i)),
                views: 40_000,
                likes: 1_600,
                comments: 160,
            })
            .collect();
        run_pipeline_at(
            url,
            &videos,
            ChannelSnapshot {
                current_subscribers: subscribers,
            },
            6,
            now(),
        )
        .unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn test_render_forecast_sections() {
        let md = render_forecast(&forecast("https://yt/c/one", 50_000));
        assert!(md.starts_with("# Growth Forecast: https://yt/c/one"));
        assert!(md.contains("| Current subscribers | 50,000 |"));
        assert!(md.contains("## 🏁 Milestones"));
        assert!(md.contains("2025-07"));
    }

    #[test]
    fn test_render_comparison_lists_failures() {
        let report = ComparisonReport::build(
            forecast("primary", 10_000),
            vec![
                CompetitorOutcome {
                    channel_url: "rival".to_string(),
                    result: Ok(forecast("rival", 300_000)),
                },
                CompetitorOutcome {
                    channel_url: "gone".to_string(),
                    result: Err(DomainError::NoVideoData),
                },
            ],
        );
        let md = render_comparison(&report);
        assert!(md.contains("| 1 |"));
        assert!(md.contains("**rival**: gap 290,000"));
        assert!(md.contains("## ⚠️ Not Analyzed"));
        assert!(md.contains("- gone: "));
    }
}
