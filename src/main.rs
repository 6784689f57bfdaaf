//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use growth_forecast::adapters::api::{HttpDataSource, MockDataSource};
use growth_forecast::adapters::report::FsReportWriter;
use growth_forecast::adapters::ui::tui::TuiInputPort;
use growth_forecast::ports::{ChannelDataSource, InputPort, ReportPort};
use growth_forecast::shared::config::AppConfig;
use growth_forecast::usecases::{ComparisonService, ForecastService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    growth_forecast::adapters::ui::init_ui();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    // --- Data source: analytics API, or offline fixtures ---
    let source: Arc<dyn ChannelDataSource> = if cfg.is_mock() {
        warn!("GROWTH_FORECAST_USE_MOCK is set, using demo data source");
        Arc::new(MockDataSource::demo())
    } else {
        info!(
            base_url = %cfg.api_base_url_or_default(),
            timeout_secs = cfg.request_timeout_secs_or_default(),
            "analytics API data source"
        );
        Arc::new(HttpDataSource::from_config(&cfg).map_err(|e| anyhow::anyhow!("{}", e))?)
    };

    let reports_dir = PathBuf::from(cfg.reports_dir_or_default());
    info!(path = %reports_dir.display(), "reports directory");
    let reports: Arc<dyn ReportPort> = Arc::new(FsReportWriter::new(&reports_dir));

    // --- Services ---
    let horizon_months = cfg.horizon_months_or_default();
    info!(horizon_months, "forecast horizon");
    let forecasts = Arc::new(ForecastService::new(Arc::clone(&source), horizon_months));
    let comparisons = Arc::new(ComparisonService::new(Arc::clone(&source), horizon_months));

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(forecasts, comparisons, reports));

    // --- Run (main menu -> Creator / Business / Exit) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
