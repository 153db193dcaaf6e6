//! Console summary printed after a completed run.

use std::fmt::Write;

use recast_core::{Config, RunOutcome};

/// Renders the human-readable summary, one fact per line.
pub fn render(config: &Config, outcome: &RunOutcome) -> String {
    let totals = &outcome.record.totals;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Found: {} .{} files",
        totals.found, config.conversion.source_extension
    );
    if let Some(tool) = &outcome.tool_path {
        let _ = writeln!(out, "Using {}: {}", config.tool.program, tool.display());
    }
    let _ = writeln!(out, "Converted: {}", totals.converted);
    let _ = writeln!(out, "Skipped: {}", totals.skipped);
    let _ = writeln!(out, "Failed: {}", totals.failed);
    let _ = writeln!(
        out,
        "JSON report (history): {}",
        outcome.history_path.display()
    );
    let _ = writeln!(
        out,
        "CSV report (last run): {}",
        outcome.snapshot_path.display()
    );
    out
}
