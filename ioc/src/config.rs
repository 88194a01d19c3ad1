//! Container configuration and its YAML loading.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_BASE_NAME: &str = "beanstalk";
const DEFAULT_CONFIG_EXTENSION: &str = "yaml";

/// Tunables for a [`Container`](crate::Container).
///
/// ```yaml
/// max_resolution_depth: 32
/// log_startup_summary: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerConfig {
  /// Longest resolution path allowed before giving up with `ResolutionTooDeep`.
  /// Unset means unbounded; cycles are caught by the path check either way.
  #[serde(default)]
  pub max_resolution_depth: Option<usize>,
  /// Emit an `info` event once start-up completes.
  #[serde(default = "default_log_startup_summary")]
  pub log_startup_summary: bool,
}

fn default_log_startup_summary() -> bool {
  true
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      max_resolution_depth: None,
      log_startup_summary: default_log_startup_summary(),
    }
  }
}

impl ContainerConfig {
  pub fn from_yaml_str(yaml: &str) -> Result<Self> {
    let config: ContainerConfig =
      serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_file(config_path: &Path) -> Result<Self> {
    let file = File::open(config_path)?;
    let reader = io::BufReader::new(file);
    let config: ContainerConfig =
      serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    if self.max_resolution_depth == Some(0) {
      return Err(Error::InvalidConfigValue {
        field: "max_resolution_depth".to_string(),
        message: "must be at least 1".to_string(),
      });
    }
    Ok(())
  }
}

/// Finds the configuration file in the working directory.
///
/// See [`find_config_file_in`] for the search order.
pub fn find_config_file(environment_suffix: Option<&str>) -> Result<PathBuf> {
  find_config_file_in(Path::new("."), environment_suffix)
}

/// Looks for `beanstalk.<env>.yaml`, then `beanstalk.yaml`, inside `dir`.
///
/// The environment comes from `environment_suffix`, else `BEANSTALK_ENV`, else `APP_ENV`.
pub fn find_config_file_in(dir: &Path, environment_suffix: Option<&str>) -> Result<PathBuf> {
  let base_name = DEFAULT_CONFIG_BASE_NAME;
  let extension = DEFAULT_CONFIG_EXTENSION;

  let env_from_var = environment_suffix
    .map(|s| s.to_string())
    .or_else(|| env::var("BEANSTALK_ENV").ok())
    .or_else(|| env::var("APP_ENV").ok());

  let mut files_to_check: Vec<String> = Vec::new();

  if let Some(env_str) = &env_from_var {
    if !env_str.is_empty() {
      files_to_check.push(format!("{}.{}.{}", base_name, env_str, extension));
    }
  }
  files_to_check.push(format!("{}.{}", base_name, extension));

  for file_name in &files_to_check {
    let path = dir.join(file_name);
    if path.is_file() {
      return Ok(path);
    }
  }

  Err(Error::ConfigNotFound(format!(
    "Searched for: {:?} in {:?}. Provide a config file or check BEANSTALK_ENV/APP_ENV.",
    files_to_check, dir
  )))
}
