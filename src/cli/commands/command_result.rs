use std::path::PathBuf;

use crate::core::{MergeEvent, SourceFile};

#[derive(Debug)]
pub enum CommandSummary {
    Merge(MergeSummary),
    List(ListSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct MergeSummary {
    /// Written file, or `None` when the merge went to stdout.
    pub output: Option<PathBuf>,
    pub file_count: usize,
    pub header_count: usize,
    pub source_count: usize,
    pub global_include_count: usize,
    pub suppressed_count: usize,
    pub failed_count: usize,
}

#[derive(Debug)]
pub struct ListSummary {
    pub files: Vec<SourceFile>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running cmerge commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Configured directories that were not found.
    pub missing_dirs: Vec<String>,
    /// Directory entries that could not be accessed while scanning.
    pub skipped_count: usize,
    /// Per-file events in the order they happened.
    /// Empty for commands that do not merge.
    pub events: Vec<MergeEvent>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            missing_dirs: Vec::new(),
            skipped_count: 0,
            events: Vec::new(),
        }
    }
}
