//! Report adapters. Markdown and CSV exports of forecasts.

pub mod csv_export;
pub mod fs_report;
pub mod markdown;

pub use csv_export::series_to_csv;
pub use fs_report::{FsReportWriter, channel_slug};
pub use markdown::{group_thousands, render_comparison, render_forecast};
