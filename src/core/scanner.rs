use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Header,
    Source,
}

/// A file selected for merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path used to read the file.
    pub path: PathBuf,
    /// Configured directory joined with the path below it, e.g. `sim/common/utils.h`.
    /// Used for ordering and for every marker written into the merged output.
    pub display: String,
    pub kind: FileKind,
}

impl SourceFile {
    pub fn is_header(&self) -> bool {
        self.kind == FileKind::Header
    }

    /// File name without directories; the identity used for duplicate suppression.
    pub fn basename(&self) -> String {
        basename(&self.display).to_string()
    }
}

/// Returns the last path segment of `path`, accepting both separators.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Result of scanning the configured directories.
pub struct ScanResult {
    /// Files in merge order.
    pub files: Vec<SourceFile>,
    /// Configured directories that do not exist under the root.
    pub missing_dirs: Vec<String>,
    /// Walk entries that could not be accessed.
    pub skipped_count: usize,
}

pub fn scan_files(root: &Path, config: &Config, verbose: bool) -> ScanResult {
    let mut headers: Vec<SourceFile> = Vec::new();
    let mut sources: Vec<SourceFile> = Vec::new();
    let mut missing_dirs = Vec::new();
    let mut skipped_count = 0;

    let ignore_patterns: Vec<Pattern> = config
        .ignores
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    for dir in &config.directories {
        let dir_path = root.join(dir);
        if !dir_path.is_dir() {
            missing_dirs.push(dir.clone());
            continue;
        }

        for entry in WalkDir::new(&dir_path).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            // Follows symlinked files; symlinked directories are not descended.
            if !entry.path().is_file() {
                continue;
            }

            let Some(kind) = classify(entry.path(), config) else {
                continue;
            };

            let display = display_path(dir, entry.path(), &dir_path);
            if ignore_patterns.iter().any(|p| p.matches(&display)) {
                continue;
            }

            let file = SourceFile {
                path: entry.path().to_path_buf(),
                display,
                kind,
            };
            match kind {
                FileKind::Header => headers.push(file),
                FileKind::Source => sources.push(file),
            }
        }
    }

    let files = merge_order(headers, sources, config.effective_priority_directory());

    ScanResult {
        files,
        missing_dirs,
        skipped_count,
    }
}

/// Orders files for merging: priority headers, other headers, then sources.
///
/// Headers keep their walk order within each bucket; sources are sorted by
/// display path.
pub fn merge_order(
    mut headers: Vec<SourceFile>,
    mut sources: Vec<SourceFile>,
    priority_dir: Option<&str>,
) -> Vec<SourceFile> {
    if let Some(priority) = priority_dir {
        let priority = Path::new(priority);
        headers.sort_by_key(|h| !Path::new(&h.display).starts_with(priority));
    }
    sources.sort_by(|a, b| a.display.cmp(&b.display));

    headers.extend(sources);
    headers
}

fn classify(path: &Path, config: &Config) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?;
    if config.header_extensions.iter().any(|e| e == ext) {
        Some(FileKind::Header)
    } else if config.source_extensions.iter().any(|e| e == ext) {
        Some(FileKind::Source)
    } else {
        None
    }
}

fn display_path(dir: &str, path: &Path, dir_path: &Path) -> String {
    let relative = path.strip_prefix(dir_path).unwrap_or(path);
    let mut display = dir.trim_end_matches('/').to_string();
    for component in relative.components() {
        display.push('/');
        display.push_str(&component.as_os_str().to_string_lossy());
    }
    display
}
