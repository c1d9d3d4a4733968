//! Runtime configuration
//!
//! [`Config`] is built once at startup and handed to discovery, the registry
//! and the scanner. Sources, lowest precedence first: built-in defaults, the
//! `[meta]` section of the TOML configuration file, `GITMETA_*` environment
//! variables, command line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory name used under the platform cache and config directories
pub const APP_DIR: &str = "gitmeta";

pub const ENV_SCANROOT: &str = "GITMETA_SCANROOT";
pub const ENV_TERMINAL: &str = "GITMETA_TERMINAL";
pub const ENV_REPOLIST: &str = "GITMETA_REPOLIST";
pub const ENV_IGNORELIST: &str = "GITMETA_IGNORELIST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory of the discovery walk
    pub scan_root: PathBuf,
    /// Command template for opening a terminal, `None` disables the feature
    pub terminal: Option<String>,
    /// Registry file (one repository path per line)
    pub registry_file: PathBuf,
    /// Ignore file (one literal path or glob pattern per line)
    pub ignore_file: PathBuf,
}

/// Keys recognised in the `[meta]` section. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MetaSection {
    pub scanroot: Option<String>,
    pub terminal: Option<String>,
    pub repolist: Option<String>,
    pub ignorelist: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("The specified configuration file does not exist: {}", path.display())]
    Missing { path: PathBuf },
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let registry_file = dirs::cache_dir()
            .map(|d| d.join(APP_DIR).join("repolist"))
            .unwrap_or_else(|| home.join(".gitmeta_repolist"));
        let ignore_file = dirs::config_dir()
            .map(|d| d.join(APP_DIR).join("ignore"))
            .unwrap_or_else(|| home.join(".gitmeta_ignore"));
        Self {
            scan_root: home,
            terminal: None,
            registry_file,
            ignore_file,
        }
    }
}

impl Config {
    /// Default location of the configuration file
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("gitmeta.toml"))
    }

    /// Apply the `[meta]` section of a parsed configuration file
    pub fn apply_meta_section(&mut self, meta: &MetaSection) {
        if let Some(scanroot) = meta.scanroot.as_deref() {
            self.scan_root = expand_home(scanroot);
        }
        if let Some(terminal) = meta.terminal.as_deref() {
            self.set_terminal(terminal);
        }
        if let Some(repolist) = meta.repolist.as_deref() {
            self.registry_file = expand_home(repolist);
        }
        if let Some(ignorelist) = meta.ignorelist.as_deref() {
            self.ignore_file = expand_home(ignorelist);
        }
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(scanroot) = lookup(ENV_SCANROOT).filter(|v| !v.is_empty()) {
            self.scan_root = expand_home(&scanroot);
        }
        if let Some(terminal) = lookup(ENV_TERMINAL) {
            self.set_terminal(&terminal);
        }
        if let Some(repolist) = lookup(ENV_REPOLIST).filter(|v| !v.is_empty()) {
            self.registry_file = expand_home(&repolist);
        }
        if let Some(ignorelist) = lookup(ENV_IGNORELIST).filter(|v| !v.is_empty()) {
            self.ignore_file = expand_home(&ignorelist);
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    // Blank templates disable the terminal action
    fn set_terminal(&mut self, template: &str) {
        let template = template.trim();
        self.terminal = if template.is_empty() {
            None
        } else {
            Some(template.to_string())
        };
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    Path::new(path).to_path_buf()
}
