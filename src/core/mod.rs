//! Core merge engine.
//!
//! - `scanner`: finds headers and sources and puts them in merge order
//! - `guard`: detects and strips include guards / `#pragma once`
//! - `includes`: local include rewriting and global include collection
//! - `merge`: the two-pass driver and its per-run state
//! - `writer`: renders the merged translation unit
//! - `context`: configuration loading and scanning for CLI commands

pub mod context;
pub mod guard;
pub mod includes;
pub mod merge;
pub mod scanner;
pub mod writer;

pub use context::MergeContext;
pub use merge::{FileBlock, MergeEvent, MergeOutput, merge_files};
pub use scanner::{FileKind, ScanResult, SourceFile, scan_files};
pub use writer::write_merged;
