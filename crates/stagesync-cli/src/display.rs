//! Console rendering for sync reports

use console::{style, Term};
use stagesync_engine::SyncResult;
use stagesync_types::{CopyOutcome, SubdirReport, SyncStats};
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Print the intro banner
pub fn print_banner(source: &Path) {
    println!(
        "{}",
        style(format!("stagesync v{}", env!("CARGO_PKG_VERSION")))
            .cyan()
            .bold()
    );
    println!(
        "{}",
        style(format!("Source: {}", source.display())).dim()
    );
}

/// Render one target's pass
pub fn render_result(target: &Path, result: &SyncResult) {
    println!();
    println!(
        "{} {}",
        style("→").green().bold(),
        style(target.display()).cyan().bold()
    );

    for report in &result.reports {
        render_subdir(report);
    }
}

fn render_subdir(report: &SubdirReport) {
    println!("  {}", style(&report.name).bold());

    if let Some(note) = &report.note {
        println!("    {}", style(note).yellow());
        return;
    }

    for (name, modified) in &report.latest {
        println!(
            "    latest: {} ({})",
            name,
            style(format_time(*modified)).dim()
        );
    }

    for deletion in &report.deletions {
        match &deletion.result {
            Ok(()) => println!("    {} {}", style("deleted").magenta(), deletion.name),
            Err(reason) => println!(
                "    {} {}: {}",
                style("delete failed").red(),
                deletion.name,
                reason
            ),
        }
    }

    for copy in &report.copies {
        match &copy.outcome {
            CopyOutcome::Copied => println!("    {} {}", style("copied").green(), copy.name),
            CopyOutcome::Replaced => println!("    {} {}", style("replaced").green(), copy.name),
            CopyOutcome::SkippedByUser => {
                println!("    {} {}", style("skipped").yellow(), copy.name);
            }
            CopyOutcome::Failed { reason } => {
                println!("    {} {}: {}", style("failed").red(), copy.name, reason);
            }
        }
    }
}

/// Render a target whose whole pass failed
pub fn render_target_failure(target: &Path, error: &stagesync_types::Error) {
    println!();
    println!(
        "{} {}: {}",
        style("✗").red().bold(),
        style(target.display()).cyan(),
        style(error).red()
    );
}

/// Render the aggregate summary across all targets
pub fn render_summary(stats: &SyncStats, targets: usize, failed: usize, dry_run: bool) {
    println!();
    if dry_run {
        println!("{}", style("Summary (dry run):").bold().underlined());
    } else {
        println!("{}", style("Summary:").bold().underlined());
    }
    println!("  Targets processed: {}", style(targets - failed).green());
    if failed > 0 {
        println!("  Targets failed: {}", style(failed).red());
    }
    println!("  Files copied: {}", style(stats.files_copied).green());
    println!("  Files replaced: {}", style(stats.files_replaced).green());
    println!("  Files skipped: {}", style(stats.files_skipped).yellow());
    println!("  Files deleted: {}", style(stats.files_deleted).magenta());
    if stats.errors > 0 {
        println!("  Errors: {}", style(stats.errors).red());
    } else {
        println!("  Errors: {}", style(stats.errors).green());
    }
    println!("  Duration: {}", format_duration(stats.duration));
}

/// Hold the console open until a key is pressed
pub fn wait_for_key() {
    let term = Term::stdout();
    if term.is_term() {
        println!();
        println!("{}", style("Press any key to exit...").dim());
        let _ = term.read_key();
    }
}

fn format_time(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}
