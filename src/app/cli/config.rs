//! TOML configuration file parsing and loading
//!
//! Top-level keys configure logging and color. The `[meta]` section holds
//! the scanner settings and becomes part of [`Config`]. Unknown keys are
//! ignored.

use crate::core::config::{Config, ConfigError, MetaSection};
use std::path::{Path, PathBuf};

use super::args::Args;

/// A parsed configuration file
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub table: toml::Table,
}

impl ConfigFile {
    /// Load the explicit file, or the default one if it exists.
    ///
    /// An explicit file must exist. A missing default file is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Missing {
                        path: path.to_path_buf(),
                    });
                }
                path.to_path_buf()
            }
            None => match Config::default_file() {
                Some(path) if path.exists() => path,
                _ => return Ok(None),
            },
        };
        Self::read(&path).map(Some)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let table = toml::from_str::<toml::Table>(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    /// The `[meta]` section, empty when absent
    pub fn meta_section(&self) -> Result<MetaSection, ConfigError> {
        match self.table.get("meta") {
            Some(value) => value
                .clone()
                .try_into::<MetaSection>()
                .map_err(|e| ConfigError::Parse {
                    path: self.path.clone(),
                    message: format!("[meta] {}", e),
                }),
            None => Ok(MetaSection::default()),
        }
    }
}

impl Args {
    /// Fill logging and color settings from the file where the command line
    /// left them unset
    pub fn apply_toml_values(&mut self, config: &toml::Table) {
        if self.color_choice().is_none() {
            if let Some(color) = config.get("color").and_then(|v| v.as_bool()) {
                self.color = color;
                self.no_color = !color;
            }
        }
        if self.log_level.is_none() {
            if let Some(log_level) = config.get("log-level").and_then(|v| v.as_str()) {
                self.log_level = Some(log_level.to_string());
            }
        }
        if self.log_file.is_none() {
            if let Some(log_file) = config.get("log-file").and_then(|v| v.as_str()) {
                self.log_file = Some(PathBuf::from(log_file));
            }
        }
        if self.log_format.is_none() {
            if let Some(log_format) = config.get("log-format").and_then(|v| v.as_str()) {
                self.log_format = Some(log_format.to_string());
            }
        }
    }
}

/// Build the runtime configuration: defaults, then the `[meta]` section,
/// then the environment, then command line flags
pub fn build_config<F>(
    args: &Args,
    file: Option<&ConfigFile>,
    env: F,
) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();
    if let Some(file) = file {
        config.apply_meta_section(&file.meta_section()?);
        log::debug!("Applied [meta] from {}", file.path.display());
    }
    config.apply_env_with(env);
    if let Some(scan_root) = args.scan_root.as_ref() {
        config.scan_root = scan_root.clone();
    }
    log::debug!("Configuration: {:?}", config);
    Ok(config)
}
