use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".cmergerc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_directories")]
    pub directories: Vec<String>,
    /// Headers under this directory are merged before all other headers.
    /// Falls back to the first entry of `directories` when unset.
    #[serde(default = "default_priority_directory")]
    pub priority_directory: Option<String>,
    #[serde(default = "default_header_extensions")]
    pub header_extensions: Vec<String>,
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_output() -> String {
    "main.cpp".to_string()
}

fn default_directories() -> Vec<String> {
    ["sim/include", "sim/common", "sim/simx"]
        .map(String::from)
        .to_vec()
}

fn default_priority_directory() -> Option<String> {
    Some("sim/include".to_string())
}

fn default_header_extensions() -> Vec<String> {
    vec!["h".to_string()]
}

fn default_source_extensions() -> Vec<String> {
    vec!["cpp".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            directories: default_directories(),
            priority_directory: default_priority_directory(),
            header_extensions: default_header_extensions(),
            source_extensions: default_source_extensions(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if no directories or extensions are configured, if an
    /// extension is both a header and a source extension, or if any glob
    /// pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.directories.is_empty() {
            bail!("'directories' must list at least one directory");
        }
        if self.header_extensions.is_empty() {
            bail!("'headerExtensions' must list at least one extension");
        }
        if self.source_extensions.is_empty() {
            bail!("'sourceExtensions' must list at least one extension");
        }

        if let Some(ext) = self
            .header_extensions
            .iter()
            .find(|ext| self.source_extensions.contains(ext))
        {
            bail!(
                "Extension \"{}\" is listed in both 'headerExtensions' and 'sourceExtensions'",
                ext
            );
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    /// The directory whose headers are merged first.
    pub fn effective_priority_directory(&self) -> Option<&str> {
        self.priority_directory
            .as_deref()
            .or_else(|| self.directories.first().map(String::as_str))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
