//! Text Output
//!
//! Fixed-width tables for terminal display.
//!
//! - **Detailed**: one row per (problem size, benchmark), sizes ascending,
//!   with the ratio against the baseline at the same size.
//! - **Concise**: one row per benchmark, all sizes collapsed into a single
//!   ns/op figure compared against the baseline's.
//!
//! The baseline row is marked with `*` and shows `-` in the ratio column.
//! A suite without a baseline shows `???` there.

use crate::report::{Report, ns_per_op, ops_per_sec};
use std::io::{self, Write};

const RULE_WIDTH: usize = 80;

const DETAILED_HEADER: &str =
    "   Name (baseline is *)   |   Dim   |  Total ms |  ns/op  |Baseline| Ops/second\n";

const CONCISE_HEADER: &str = "   Name (baseline is *)   |  ns/op  | Baseline |  Ops/second\n";

/// Format the detailed problem-space tables of every suite
pub fn generate_detailed_report(report: &Report) -> String {
    let mut output = String::new();

    for suite in &report.suites {
        push_suite_title(&mut output, suite.name.as_deref());
        push_rule(&mut output);
        output.push_str(DETAILED_HEADER);
        push_rule(&mut output);

        for (dimension, entries) in suite.problem_space_view() {
            let baseline = entries.iter().position(|e| e.is_baseline);

            for (index, entry) in entries.iter().enumerate() {
                push_name(&mut output, entry.name, entry.is_baseline);

                output.push_str(&format!(
                    " |{:>8} |{:>10.3} |{:>8} |",
                    dimension,
                    entry.total_time_ns as f64 / 1_000_000.0,
                    ns_per_op(entry.total_time_ns, dimension)
                ));

                match baseline {
                    Some(b) if b == index => output.push_str("      - |"),
                    Some(b) => output.push_str(&format!(
                        "{:>7.3} |",
                        entry.total_time_ns as f64 / entries[b].total_time_ns as f64
                    )),
                    None => output.push_str("    ??? |"),
                }

                output.push_str(&format!(
                    "{:>11.1}\n",
                    ops_per_sec(dimension as u64, entry.total_time_ns)
                ));
            }
        }

        push_rule(&mut output);
    }

    output
}

/// Format one summary line per benchmark for every suite
pub fn generate_concise_report(report: &Report) -> String {
    let mut output = String::new();

    for suite in &report.suites {
        push_suite_title(&mut output, suite.name.as_deref());
        push_rule(&mut output);
        output.push_str(CONCISE_HEADER);
        push_rule(&mut output);

        let baseline = suite.benchmarks.iter().position(|b| b.is_baseline);
        let baseline_ns_per_op = baseline.map(|b| suite.benchmarks[b].ns_per_op());

        for (index, bench) in suite.benchmarks.iter().enumerate() {
            push_name(&mut output, &bench.name, bench.is_baseline);

            let (total_time, total_iterations) = bench.totals();
            let ns_per_op = bench.ns_per_op();
            output.push_str(&format!(" |{:>8} |", ns_per_op));

            match (baseline, baseline_ns_per_op) {
                (Some(b), _) if b == index => output.push_str("        - |"),
                (Some(_), Some(base)) => output.push_str(&format!(
                    "{:>9.3} |",
                    ns_per_op as f64 / base as f64
                )),
                _ => output.push_str("      ??? |"),
            }

            output.push_str(&format!(
                "{:>12.1}\n",
                ops_per_sec(total_iterations, total_time)
            ));
        }

        push_rule(&mut output);
    }

    output
}

impl Report {
    /// Write the detailed problem-space view to `out`
    pub fn render_detailed<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(generate_detailed_report(self).as_bytes())
    }

    /// Write the concise one-line-per-benchmark view to `out`
    pub fn render_concise<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(generate_concise_report(self).as_bytes())
    }
}

fn push_suite_title(output: &mut String, name: Option<&str>) {
    if let Some(name) = name {
        output.push_str(name);
        output.push_str(":\n");
    }
}

fn push_rule(output: &mut String) {
    output.push_str(&"_".repeat(RULE_WIDTH));
    output.push('\n');
}

fn push_name(output: &mut String, name: &str, is_baseline: bool) {
    if is_baseline {
        output.push_str(&format!("{:>23} *", name));
    } else {
        output.push_str(&format!("{:>25}", name));
    }
}
