//! Metrics aggregation: the weekly GitHub walk and the spreadsheet pipelines

pub mod cells;
pub mod fetch;
pub mod metrics;
pub mod parse;
pub mod source;
pub mod weekly;

pub use fetch::{run_finance_pipeline, run_recruitment_pipeline};
pub use source::ActivitySource;
pub use weekly::{build_report, RawTeamMetrics, ReportWindow, WeeklyMetricsService};

#[cfg(test)]
mod parse_test;
