//! Export summary reporting.

use console::style;

use crate::export::ExportSummary;

/// Print the outcome of one export operation.
pub fn print_export_summary(title: &str, summary: &ExportSummary) {
    println!();
    println!("{}", style(format!("{}:", title)).bold());
    println!("  Posts:    {} scanned", summary.posts_seen);
    println!("  Written:  {}", summary.units);
    if summary.skipped > 0 {
        println!("  Skipped:  {} (videos)", summary.skipped);
    }
    if summary.failures > 0 {
        println!("  Failed:   {}", style(summary.failures).red());
    }
    for artifact in &summary.artifacts {
        println!("  Output:   {}", artifact.display());
    }
}

