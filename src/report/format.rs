//! Formatted terminal output for conservation reports.
//!
//! Formatting stays in one place so the validation code remains clean and
//! testable, and output changes are localized.

use crate::domain::ConservationReport;

/// Render the per-interval table plus the MAPE summary line.
pub fn format_report(report: &ConservationReport) -> String {
    let mut out = String::new();

    out.push_str("=== conservation check ===\n");
    out.push_str(&format!(
        "{:>8}  {:>12}  {:>12}  {:>12}\n",
        "interval", "original", "fine mean", "deviation %"
    ));

    for check in &report.intervals {
        let deviation = match check.deviation_pct {
            Some(d) => format!("{d:>12.6}"),
            None => format!("{:>12}", "n/a"),
        };
        out.push_str(&format!(
            "{:>8}  {:>12.4}  {:>12.4}  {deviation}\n",
            check.index, check.original, check.fine_mean
        ));
    }

    out.push_str(&format!(
        "\nMAPE: {:.6}% over {} of {} intervals\n",
        report.mape,
        report.defined_intervals,
        report.intervals.len()
    ));

    out
}
