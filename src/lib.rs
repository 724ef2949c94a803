//! cmerge - merge C/C++ headers and sources into one translation unit
//!
//! cmerge scans a fixed, ordered list of directories, puts headers before
//! sources, strips include guards, comments out includes of merged files and
//! hoists every external include into one sorted block at the top of the
//! output. The result is a starting point for single translation unit builds
//! and still needs manual review.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, guard stripping, include handling and output writing

pub mod cli;
pub mod config;
pub mod core;
