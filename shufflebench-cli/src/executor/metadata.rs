//! Report Metadata
//!
//! Records what is needed to interpret or replay a run: the scheduling
//! seed, the harness version, the platform and the generation time.

use chrono::Utc;
use shufflebench_report::ReportMeta;

/// Build report metadata for a run scheduled with `seed`
pub fn build_report_meta(seed: u64) -> ReportMeta {
    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        seed,
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}
