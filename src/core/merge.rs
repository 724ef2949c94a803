//! Two-pass merge driver.
//!
//! 1. **Collection**: read every file's raw lines and gather the global includes
//! 2. **Transformation**: in merge order, suppress duplicate headers, strip
//!    guards and comment out local includes
//!
//! Per-file failures become [`FileBlock::Failed`] entries and events; they never
//! abort the run.

use std::{collections::HashSet, fs, path::Path};

use super::{
    guard::{detect_guard, strip_guard},
    includes::{GlobalIncludes, LocalIncludeResolver, rewrite_local_includes},
    scanner::SourceFile,
};
use crate::config::Config;

/// Basenames of headers whose content has already been emitted.
///
/// Keyed by file name only: two headers with the same name in different
/// directories count as one header.
#[derive(Debug, Default)]
pub struct HeaderRegistry {
    names: HashSet<String>,
}

impl HeaderRegistry {
    /// Records a header name, returning false if it was already present.
    pub fn record(&mut self, name: String) -> bool {
        self.names.insert(name)
    }
}

/// The output block produced for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBlock {
    Merged {
        display: String,
        /// Note about the removed guard or pragma (headers only).
        annotation: Option<String>,
        body: String,
    },
    /// Placeholder for a header whose basename was already emitted.
    AlreadyIncluded { display: String },
    Failed { display: String, error: String },
}

/// A file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub display: String,
    pub error: String,
}

/// Something worth telling the user about during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    /// Raw read failed during the collection pass.
    CollectFailed(FileError),
    /// Read failed during the transformation pass.
    ProcessFailed(FileError),
    Processed { display: String },
    HeaderSuppressed { display: String },
    IncludeRewritten { display: String, line: String },
}

/// Everything needed to write the merged file.
#[derive(Debug)]
pub struct MergeOutput {
    pub file_count: usize,
    /// Files that could not be read during the collection pass.
    pub collect_errors: Vec<FileError>,
    pub global_includes: GlobalIncludes,
    pub blocks: Vec<FileBlock>,
    pub events: Vec<MergeEvent>,
}

impl MergeOutput {
    pub fn failed_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, FileBlock::Failed { .. }))
            .count()
    }

    pub fn suppressed_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, FileBlock::AlreadyIncluded { .. }))
            .count()
    }
}

/// Merge state for a single run.
pub struct Merger {
    resolver: LocalIncludeResolver,
    registry: HeaderRegistry,
    events: Vec<MergeEvent>,
}

impl Merger {
    /// Creates a merger for the given scanned files.
    ///
    /// Header basenames are taken from `files` so local include detection
    /// knows about headers that have not been emitted yet.
    pub fn new(root: &Path, config: &Config, files: &[SourceFile]) -> Self {
        let header_names: Vec<String> = files
            .iter()
            .filter(|f| f.is_header())
            .map(SourceFile::basename)
            .collect();

        Self {
            resolver: LocalIncludeResolver::new(
                root,
                &config.directories,
                header_names.iter().map(String::as_str),
            ),
            registry: HeaderRegistry::default(),
            events: Vec::new(),
        }
    }

    pub fn run(mut self, files: &[SourceFile]) -> MergeOutput {
        let (global_includes, collect_errors) = self.collect_global_includes(files);

        let blocks = files
            .iter()
            .map(|file| match read_source(file) {
                Ok(content) => self.transform(file, &content),
                Err(error) => {
                    self.events.push(MergeEvent::ProcessFailed(error.clone()));
                    FileBlock::Failed {
                        display: error.display,
                        error: error.error,
                    }
                }
            })
            .collect();

        MergeOutput {
            file_count: files.len(),
            collect_errors,
            global_includes,
            blocks,
            events: self.events,
        }
    }

    fn collect_global_includes(
        &mut self,
        files: &[SourceFile],
    ) -> (GlobalIncludes, Vec<FileError>) {
        let mut global_includes = GlobalIncludes::new();
        let mut errors = Vec::new();

        for file in files {
            match read_source(file) {
                Ok(content) => global_includes.collect(&content, self.resolver.header_names()),
                Err(error) => {
                    self.events.push(MergeEvent::CollectFailed(error.clone()));
                    errors.push(error);
                }
            }
        }

        (global_includes, errors)
    }

    /// Transforms one file's content into its output block.
    pub fn transform(&mut self, file: &SourceFile, content: &str) -> FileBlock {
        let display = file.display.clone();
        self.events.push(MergeEvent::Processed {
            display: display.clone(),
        });

        let (annotation, body) = if file.is_header() {
            if !self.registry.record(file.basename()) {
                self.events
                    .push(MergeEvent::HeaderSuppressed { display: display.clone() });
                return FileBlock::AlreadyIncluded { display };
            }

            let guard = detect_guard(content);
            (guard.annotation(), strip_guard(content, &guard))
        } else {
            (None, content.to_string())
        };

        let rewritten = rewrite_local_includes(&body, &self.resolver);
        self.events
            .extend(rewritten.rewritten.into_iter().map(|line| MergeEvent::IncludeRewritten {
                display: display.clone(),
                line,
            }));

        FileBlock::Merged {
            display,
            annotation,
            body: rewritten.text,
        }
    }
}

/// Runs both passes over `files` (already in merge order).
pub fn merge_files(root: &Path, config: &Config, files: &[SourceFile]) -> MergeOutput {
    Merger::new(root, config, files).run(files)
}

fn read_source(file: &SourceFile) -> Result<String, FileError> {
    fs::read_to_string(&file.path).map_err(|e| FileError {
        display: file.display.clone(),
        error: e.to_string(),
    })
}
