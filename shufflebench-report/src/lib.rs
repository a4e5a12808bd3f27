#![warn(missing_docs)]
//! ShuffleBench Report - Aggregated Results and Rendering
//!
//! Holds the problem-space report built after a run and renders it as:
//! - Detailed text (one row per problem size and benchmark)
//! - Concise text (one row per benchmark)
//! - CSV (spreadsheet-compatible)
//! - JSON (machine-readable)
//!
//! Rendering is pure formatting; nothing is recomputed from raw samples.

mod csv;
mod json;
mod report;
mod text;

pub use csv::generate_csv_report;
pub use json::generate_json_report;
pub use report::{
    BenchmarkReport, ProblemSpace, ProblemSpaceEntry, Report, ReportMeta, SuiteReport,
};
pub use text::{generate_concise_report, generate_detailed_report};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Detailed problem-space table
    Text,
    /// One line per benchmark
    Concise,
    /// Detailed table followed by the concise one
    #[default]
    Human,
    /// CSV for spreadsheets
    Csv,
    /// JSON with full schema
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "detailed" => Ok(OutputFormat::Text),
            "concise" | "con" => Ok(OutputFormat::Concise),
            "human" | "both" => Ok(OutputFormat::Human),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
