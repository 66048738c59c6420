//! Text rendering of scan results.

use std::path::Path;

use colored::Colorize;
use stalewatch::{Classification, Finding, ScanReport, Status};

const MAX_DISPLAY_ERRORS: usize = 5;

/// Print one finding as `STATUS: file:line [decl] KIND(tag) stale:.. expires:.. message`.
pub fn print_finding(finding: &Finding) {
    let status = match finding.status {
        Status::Expired => finding.status.as_str().red().bold(),
        _ => finding.status.as_str().yellow().bold(),
    };

    let marker = match &finding.tag {
        Some(tag) => format!("{}({tag})", finding.kind),
        None => finding.kind.to_string(),
    };

    println!(
        "{status}: {}:{} [{}] {} {} {} {}",
        display_path(&finding.file),
        finding.line,
        finding.declaration.cyan(),
        marker,
        format!("stale:{}", finding.stale_date).dimmed(),
        format!("expires:{}", finding.expires).dimmed(),
        finding.message
    );
}

/// Print the run summary and any skipped files.
pub fn print_summary(report: &ScanReport, classification: &Classification) {
    let stale = classification.count(Status::Stale);
    let expired = classification.count(Status::Expired);

    if stale + expired > 0 {
        println!();
    }

    let headline = if expired > 0 {
        "Found".red().bold()
    } else if stale > 0 {
        "Found".yellow().bold()
    } else {
        "Clean".green().bold()
    };
    println!(
        "{headline}: {stale} stale, {expired} expired ({} files scanned)",
        report.files_scanned
    );

    if !report.directories_skipped.is_empty() {
        println!(
            "{}: {} directories (unreadable)",
            "Skipped".yellow(),
            report.directories_skipped.len()
        );
    }

    if !report.errors.is_empty() {
        println!();
        println!("{} ({}):", "Skipped files".yellow().bold(), report.errors.len());
        for err in report.errors.iter().take(MAX_DISPLAY_ERRORS) {
            // Yellow for source problems, red for read failures.
            let bullet = if err.kind.is_input_error() {
                "•".yellow()
            } else {
                "•".red()
            };
            println!(
                "  {} {}: {}",
                bullet,
                display_path(&err.path),
                err.message
            );
        }
        if report.errors.len() > MAX_DISPLAY_ERRORS {
            println!("  ... and {} more", report.errors.len() - MAX_DISPLAY_ERRORS);
        }
    }
}

/// Drop a leading `./` so paths read the way the user typed them.
fn display_path(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .display()
        .to_string()
}
