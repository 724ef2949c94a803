use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::scanner::{ScanResult, scan_files},
};

/// Configuration and scanned files for one run.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--dir sim/include`)
/// 2. `.cmergerc.json` config file (searched from the root upward)
/// 3. Built-in defaults
pub struct MergeContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory the configured directories and output are relative to.
    pub root_dir: PathBuf,

    /// Files in merge order, plus missing directories.
    pub scan: ScanResult,

    /// True if a config file was found.
    pub config_from_file: bool,

    pub verbose: bool,
}

impl MergeContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!("Note: No .cmergerc.json found, using default configuration");
        }

        let mut config = config_result.config;
        apply_overrides(&mut config, common_args);
        config
            .validate()
            .context("Invalid configuration after applying command line overrides")?;

        let scan = scan_files(&root_dir, &config, verbose);

        Ok(Self {
            config,
            root_dir,
            scan,
            config_from_file: config_result.from_file,
            verbose,
        })
    }

    /// Output file location: an explicit path is used as given, the configured
    /// output is relative to the root directory.
    pub fn output_path(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.root_dir.join(&self.config.output),
        }
    }
}

fn apply_overrides(config: &mut Config, common_args: &CommonArgs) {
    if !common_args.dirs.is_empty() {
        config.directories = common_args.dirs.clone();
    }
    if let Some(ref priority_dir) = common_args.priority_dir {
        config.priority_directory = Some(priority_dir.clone());
    }
}
