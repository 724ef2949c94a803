//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow cmerge to be used as a library: the core
//! records [`MergeEvent`]s and this module turns them into the run log.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, ListSummary, MergeSummary,
};
use crate::core::{FileKind, MergeEvent};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print a command result: warnings and events to stderr, summary to stdout.
///
/// When the merged file itself went to stdout, the summary goes to stderr.
pub fn print(result: &CommandResult, verbose: bool) {
    let mut stderr = io::stderr().lock();
    print_scan_warnings_to(&result.missing_dirs, result.skipped_count, verbose, &mut stderr);
    print_events_to(&result.events, verbose, &mut stderr);

    match &result.summary {
        CommandSummary::Merge(summary) if summary.output.is_none() => {
            print_summary_to(&result.summary, &mut stderr)
        }
        _ => print_summary_to(&result.summary, &mut io::stdout().lock()),
    }
}

/// Print warnings about directories that could not be scanned.
pub fn print_scan_warnings_to<W: Write>(
    missing_dirs: &[String],
    skipped_count: usize,
    verbose: bool,
    writer: &mut W,
) {
    for dir in missing_dirs {
        let _ = writeln!(
            writer,
            "{} Directory '{}' not found. Skipping.",
            "warning:".bold().yellow(),
            dir
        );
    }

    if skipped_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }
}

/// Print merge events. Errors always print; progress and notes need `verbose`.
pub fn print_events_to<W: Write>(events: &[MergeEvent], verbose: bool, writer: &mut W) {
    for event in events {
        match event {
            MergeEvent::CollectFailed(error) => {
                let _ = writeln!(
                    writer,
                    "{} Could not read {}: {}",
                    "error:".bold().red(),
                    error.display,
                    error.error
                );
            }
            MergeEvent::ProcessFailed(error) => {
                let _ = writeln!(
                    writer,
                    "{} Could not process {}: {}",
                    "error:".bold().red(),
                    error.display,
                    error.error
                );
            }
            MergeEvent::Processed { display } if verbose => {
                let _ = writeln!(writer, "  Processing {}...", display.dimmed());
            }
            MergeEvent::HeaderSuppressed { display } if verbose => {
                let _ = writeln!(
                    writer,
                    "    {} Header {} already processed, skipping content",
                    "note:".bold().cyan(),
                    display
                );
            }
            MergeEvent::IncludeRewritten { display, line } if verbose => {
                let _ = writeln!(
                    writer,
                    "    {} Commented out local include: {} (from {})",
                    "note:".bold().cyan(),
                    line,
                    display
                );
            }
            _ => {}
        }
    }
}

/// Print the summary line(s) for a command.
pub fn print_summary_to<W: Write>(summary: &CommandSummary, writer: &mut W) {
    match summary {
        CommandSummary::Merge(summary) => print_merge_summary(summary, writer),
        CommandSummary::List(summary) => print_list(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_merge_summary<W: Write>(summary: &MergeSummary, writer: &mut W) {
    let destination = match &summary.output {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Merged {} {} into {}",
            summary.file_count,
            plural(summary.file_count, "file", "files"),
            destination
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "  {} {}, {} {}, {} global {}, {} duplicate {} skipped",
        summary.header_count,
        plural(summary.header_count, "header", "headers"),
        summary.source_count,
        plural(summary.source_count, "source", "sources"),
        summary.global_include_count,
        plural(summary.global_include_count, "include", "includes"),
        summary.suppressed_count,
        plural(summary.suppressed_count, "header", "headers"),
    );

    if summary.failed_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be processed (see ERROR comments in the output)",
            "warning:".bold().yellow(),
            summary.failed_count
        );
    }

    let _ = writeln!(
        writer,
        "{} Review the generated file for compilation and logic errors.",
        "note:".bold()
    );
}

fn print_list<W: Write>(summary: &ListSummary, writer: &mut W) {
    let count = summary.files.len();
    let _ = writeln!(
        writer,
        "Found {} {} to merge.",
        count,
        plural(count, "file", "files")
    );

    for file in &summary.files {
        let kind = match file.kind {
            FileKind::Header => "header".cyan(),
            FileKind::Source => "source".blue(),
        };
        let _ = writeln!(writer, "  - {} {}", file.display, format!("[{}]", kind).dimmed());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
