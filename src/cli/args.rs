//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `merge`: Merge the configured directories into one output file
//! - `list`: Print the merge order without writing anything
//! - `init`: Initialize a cmerge configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Returns the command if one was provided, otherwise prints help and returns None.
    pub fn command_or_help(self) -> Option<Command> {
        if self.command.is_none() {
            Self::command().print_help().ok();
        }
        self.command
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Merge(args)) => args.common.verbose,
            Some(Command::List(args)) => args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Root directory that configured directories are relative to
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory to scan, in merge order (overrides config file, repeatable)
    #[arg(long = "dir", value_name = "DIR")]
    pub dirs: Vec<String>,

    /// Directory whose headers are merged first (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub priority_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct MergeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output file (overrides config file)
    #[arg(short, long, env = "CMERGE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print the merged file to stdout instead of writing it (takes precedence over --output)
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Parser)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge headers and sources into a single output file
    Merge(MergeArgs),
    /// List the files that would be merged, in merge order
    List(ListArgs),
    /// Initialize a new .cmergerc.json configuration file
    Init,
}
