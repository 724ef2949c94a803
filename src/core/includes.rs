//! Include directive handling.
//!
//! Two textual heuristics, neither of which resolves include paths:
//! - local includes (`#include "x.h"` naming a merged header) are commented out
//! - every other include directive is hoisted into one deduplicated block

use std::{
    collections::{BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

static QUOTED_INCLUDE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^#include\s*"([^"]+)""#).unwrap());

const ANGLE_INCLUDE_PREFIX: &str = "#include <";
const QUOTED_INCLUDE_PREFIX: &str = "#include \"";

/// Prefix of a local include line after it has been commented out.
pub const MERGED_LOCALLY_PREFIX: &str = "// MERGED_LOCALLY: ";

/// Returns the target of a `#include "target"` line, ignoring leading whitespace.
pub fn quoted_include_target(line: &str) -> Option<&str> {
    QUOTED_INCLUDE_REGEX
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Decides whether a quoted include refers to a file that is being merged.
pub struct LocalIncludeResolver {
    /// Basenames of every header found by the scanner. Headers already
    /// emitted during the merge are always a subset of these.
    header_names: HashSet<String>,
    /// Configured directories, joined to the merge root.
    roots: Vec<PathBuf>,
}

impl LocalIncludeResolver {
    pub fn new<'a>(
        root: &Path,
        directories: &[String],
        header_names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            header_names: header_names.into_iter().map(String::from).collect(),
            roots: directories.iter().map(|dir| root.join(dir)).collect(),
        }
    }

    pub fn header_names(&self) -> &HashSet<String> {
        &self.header_names
    }

    /// A target is local when it is a known header name or exists relative to
    /// one of the configured directories.
    pub fn is_local(&self, target: &str) -> bool {
        self.header_names.contains(target)
            || self.roots.iter().any(|root| root.join(target).exists())
    }
}

/// Content with local includes commented out.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RewrittenContent {
    pub text: String,
    /// Original (trimmed) include lines that were commented out.
    pub rewritten: Vec<String>,
}

/// Comments out every local include line, leaving all other lines verbatim.
///
/// The result is joined with `\n` and has no trailing newline.
pub fn rewrite_local_includes(content: &str, resolver: &LocalIncludeResolver) -> RewrittenContent {
    let mut lines = Vec::new();
    let mut rewritten = Vec::new();

    for line in content.lines() {
        match quoted_include_target(line) {
            Some(target) if resolver.is_local(target) => {
                lines.push(format!("{}{}", MERGED_LOCALLY_PREFIX, line));
                rewritten.push(line.trim().to_string());
            }
            _ => lines.push(line.to_string()),
        }
    }

    RewrittenContent {
        text: lines.join("\n"),
        rewritten,
    }
}

/// Whether a raw line is an include directive to hoist into the global block.
///
/// Angle-bracket includes always qualify. Quoted includes qualify unless the
/// line mentions any known header basename; this is a substring test, so a
/// system header whose name contains a local header's name is treated as local.
pub fn is_global_include(line: &str, header_names: &HashSet<String>) -> bool {
    let line = line.trim();
    if line.starts_with(ANGLE_INCLUDE_PREFIX) {
        return true;
    }
    line.starts_with(QUOTED_INCLUDE_PREFIX)
        && !header_names.iter().any(|name| line.contains(name.as_str()))
}

/// Deduplicated include directives, iterated in lexicographic order.
#[derive(Debug, Default)]
pub struct GlobalIncludes {
    lines: BTreeSet<String>,
}

impl GlobalIncludes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every qualifying line of a file's raw content.
    pub fn collect(&mut self, content: &str, header_names: &HashSet<String>) {
        for line in content.lines() {
            if is_global_include(line, header_names) {
                self.lines.insert(line.trim().to_string());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
