//! CSV Output
//!
//! One row per (suite, benchmark, problem size). The unnamed suite has an
//! empty suite column.

use crate::report::{Report, ops_per_sec};

const HEADER: &str = "suite,benchmark,baseline,dimension,samples,total_ns,ns_per_op,baseline_ratio,ops_per_sec\n";

/// Generate a CSV report from the problem-space data
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::from(HEADER);

    for suite in &report.suites {
        let suite_name = suite.name.as_deref().map(escape).unwrap_or_default();
        let baseline = suite.baseline();

        for bench in &suite.benchmarks {
            for d in &bench.data {
                let ratio = baseline
                    .filter(|b| !std::ptr::eq(*b, bench))
                    .and_then(|b| b.data.iter().find(|bd| bd.dimension == d.dimension))
                    .map(|bd| format!("{:.3}", d.total_time_ns as f64 / bd.total_time_ns as f64))
                    .unwrap_or_default();

                output.push_str(&format!(
                    "{},{},{},{},{},{},{},{},{:.1}\n",
                    suite_name,
                    escape(&bench.name),
                    bench.is_baseline,
                    d.dimension,
                    d.samples,
                    d.total_time_ns,
                    d.ns_per_op(),
                    ratio,
                    ops_per_sec(d.dimension as u64, d.total_time_ns)
                ));
            }
        }
    }

    output
}

/// Quote a field if it contains separators or quotes
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl Report {
    /// Write the CSV view to `out`
    pub fn render_csv<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(generate_csv_report(self).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::math_report;

    #[test]
    fn test_csv_rows() {
        let csv = generate_csv_report(&math_report());
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], HEADER.trim_end());
        assert_eq!(lines[1], "math,A,true,8,2,8000,1000,,1000000.0");
        assert_eq!(lines[2], "math,A,true,64,2,64000,1000,,1000000.0");
        assert_eq!(lines[3], "math,B,false,8,2,16000,2000,2.000,500000.0");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
