//! Implements InputPort. Inquire-based interactive menu.
//!
//! Creator: forecast one channel. Business: compare a channel against competitors.
//! Every analysis races Ctrl-C; errors are printed and the menu resumes.

use super::progress::spinner;
use crate::adapters::report::group_thousands;
use crate::domain::forecast::{ComparisonReport, Direction, Risk};
use crate::domain::{ChannelForecast, DomainError};
use crate::ports::{InputPort, ReportPort};
use crate::usecases::{ComparisonService, ForecastService};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use inquire::error::InquireError;
use inquire::ui::{Color as PromptColor, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use std::io::{Write, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const MENU_CREATOR: &str = "📈 Creator: forecast my channel";
const MENU_BUSINESS: &str = "🏢 Business: compare against competitors";
const MENU_EXIT: &str = "🚪 Exit";

/// Neon theme for every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("❯").with_fg(PromptColor::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(PromptColor::LightCyan))
        .with_answer(StyleSheet::new().with_fg(PromptColor::LightCyan))
        .with_help_message(StyleSheet::new().with_fg(PromptColor::DarkGrey));
    inquire::set_global_render_config(config);
}

/// Split a comma/whitespace separated list of channel URLs, dropping blanks and duplicates.
pub fn parse_channel_list(input: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for url in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        if !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
    }
    urls
}

/// TUI adapter. Inquire prompts, crossterm colours.
pub struct TuiInputPort {
    forecasts: Arc<ForecastService>,
    comparisons: Arc<ComparisonService>,
    reports: Arc<dyn ReportPort>,
}

/// Outcome of a prompt: a value, or the user backed out.
enum Prompted<T> {
    Value(T),
    Cancelled,
}

fn prompt<T>(result: Result<T, InquireError>) -> Result<Prompted<T>, DomainError> {
    match result {
        Ok(v) => Ok(Prompted::Value(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(Prompted::Cancelled)
        }
        Err(e) => Err(DomainError::Input(e.to_string())),
    }
}

fn ask_channel(message: &str) -> Result<Prompted<String>, DomainError> {
    prompt(
        Text::new(message)
            .with_placeholder("https://www.youtube.com/@channel")
            .with_validator(|s: &str| {
                if s.trim().is_empty() {
                    Ok(inquire::validator::Validation::Invalid(
                        "Channel URL is required".into(),
                    ))
                } else {
                    Ok(inquire::validator::Validation::Valid)
                }
            })
            .prompt()
            .map(|s| s.trim().to_string()),
    )
}

/// Run `fut` under a spinner, racing Ctrl-C. `None` when interrupted.
async fn with_interrupt<T, F>(label: &str, fut: F) -> Option<T>
where
    F: Future<Output = T>,
{
    let pb = spinner(label.to_string());
    let outcome = tokio::select! {
        v = fut => Some(v),
        _ = tokio::signal::ctrl_c() => None,
    };
    pb.finish_and_clear();
    outcome
}

fn paint(color: Color, text: impl std::fmt::Display) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text.to_string()));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

fn print_error(err: &DomainError) {
    paint(Color::Red, format!("✖ {}\n", err));
}

fn print_cancelled() {
    paint(Color::Yellow, "⚠ Analysis cancelled.\n");
}

fn print_saved(paths: &[PathBuf]) {
    for p in paths {
        paint(Color::DarkGrey, format!("  saved {}\n", p.display()));
    }
}

fn print_forecast(forecast: &ChannelForecast) {
    let stats = forecast.stats();
    paint(
        Color::Magenta,
        format!("\n── {} ──\n", forecast.channel_url),
    );
    paint(
        Color::Cyan,
        format!(
            "  Current subscribers   {}\n  Total growth          {}\n  Avg monthly growth    {:.2}%\n  Avg velocity          {} / month\n",
            group_thousands(stats.current as i64),
            group_thousands(stats.total_growth),
            stats.avg_growth_rate_pct,
            group_thousands(stats.avg_velocity),
        ),
    );
    if let Some(v) = stats.projected_horizon_value {
        paint(
            Color::Green,
            format!(
                "  In {} months          {}\n",
                forecast.projection.forecasts.len(),
                group_thousands(v)
            ),
        );
    }

    let momentum_color = match (forecast.momentum.direction, forecast.momentum.risk) {
        (_, Risk::High) | (Direction::Declining, _) => Color::Red,
        (Direction::Growing, Risk::Low) => Color::Green,
        _ => Color::Yellow,
    };
    paint(
        momentum_color,
        format!(
            "  View momentum         {} (risk {}, stability {:.2})\n",
            forecast.momentum.direction, forecast.momentum.risk, forecast.momentum.stability
        ),
    );

    if forecast.milestones.is_empty() {
        paint(Color::DarkGrey, "  No milestone within the horizon.\n");
    } else {
        paint(Color::Magenta, "  Milestones\n");
        for m in &forecast.milestones {
            paint(
                Color::Cyan,
                format!(
                    "    🏁 {:>5}  {}  ({} months)\n",
                    m.label,
                    m.projected_date.format("%b %Y"),
                    m.months_away
                ),
            );
        }
    }
}

fn print_comparison(report: &ComparisonReport) {
    print_forecast(&report.primary);
    paint(Color::Magenta, "\n  Ranking by projected gain\n");
    for r in &report.ranking {
        let color = if r.channel_url == report.primary.channel_url {
            Color::Green
        } else {
            Color::Cyan
        };
        paint(
            color,
            format!(
                "    #{} {}  {}{}\n",
                r.rank,
                r.channel_url,
                if r.projected_gain >= 0 { "+" } else { "" },
                group_thousands(r.projected_gain)
            ),
        );
    }
    for c in &report.catch_ups {
        let when = match c.month {
            Some(month) => format!("catch up by {}", month.format("%b %Y")),
            None => "no catch-up within the horizon".to_string(),
        };
        paint(
            Color::Yellow,
            format!(
                "    🎯 {}: gap {}, {}\n",
                c.competitor_url,
                group_thousands(c.subscriber_gap as i64),
                when
            ),
        );
    }
    for (url, err) in report.failed() {
        paint(Color::Red, format!("    ✖ {}: {}\n", url, err));
    }
}

impl TuiInputPort {
    pub fn new(
        forecasts: Arc<ForecastService>,
        comparisons: Arc<ComparisonService>,
        reports: Arc<dyn ReportPort>,
    ) -> Self {
        Self {
            forecasts,
            comparisons,
            reports,
        }
    }

    async fn run_creator(&self) -> Result<(), DomainError> {
        let url = match ask_channel("Channel URL:")? {
            Prompted::Value(url) => url,
            Prompted::Cancelled => return Ok(()),
        };

        let label = format!("Forecasting {}...", url);
        let Some(result) = with_interrupt(&label, self.forecasts.analyze_channel(&url)).await else {
            print_cancelled();
            return Ok(());
        };

        match result {
            Ok(forecast) => {
                print_forecast(&forecast);
                self.save(self.reports.save_forecast(&forecast).await);
            }
            Err(e) => print_error(&e),
        }
        Ok(())
    }

    async fn run_business(&self) -> Result<(), DomainError> {
        let primary = match ask_channel("Your channel URL:")? {
            Prompted::Value(url) => url,
            Prompted::Cancelled => return Ok(()),
        };
        let competitors = match prompt(
            Text::new("Competitor URLs:")
                .with_help_message("Comma-separated; leave empty to rank your channel alone")
                .prompt(),
        )? {
            Prompted::Value(raw) => parse_channel_list(&raw),
            Prompted::Cancelled => return Ok(()),
        };

        let label = format!("Analyzing {} channel(s)...", competitors.len() + 1);
        let Some(result) =
            with_interrupt(&label, self.comparisons.compare(&primary, &competitors)).await
        else {
            print_cancelled();
            return Ok(());
        };

        match result {
            Ok(report) => {
                print_comparison(&report);
                self.save(self.reports.save_comparison(&report).await.map(|p| vec![p]));
            }
            Err(e) => print_error(&e),
        }
        Ok(())
    }

    /// Report export failures do not discard the on-screen result.
    fn save(&self, written: Result<Vec<PathBuf>, DomainError>) {
        match written {
            Ok(paths) => print_saved(&paths),
            Err(e) => {
                warn!(error = %e, "report export failed");
                print_error(&e);
            }
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = prompt(
                Select::new(
                    "What would you like to do?",
                    vec![MENU_CREATOR, MENU_BUSINESS, MENU_EXIT],
                )
                .prompt(),
            )?;

            let outcome = match choice {
                Prompted::Value(MENU_CREATOR) => self.run_creator().await,
                Prompted::Value(MENU_BUSINESS) => self.run_business().await,
                _ => return Ok(()),
            };

            if let Err(e) = outcome {
                match e {
                    DomainError::Input(_) => return Err(e),
                    other => print_error(&other),
                }
            }
        }
    }
}
