use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log file path, if not set, logs will be printed to stdout
  pub file: Option<String>,
  /// Log level, default is "info"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      file: None,
      level: default_log_level(),
    }
  }
}

/// apikeys configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
  /// Server listening address (Redis protocol)
  #[serde(default = "default_server_addr")]
  pub server_addr: String,

  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,

  /// API keys stored during the configuration phase. Values are kept loosely
  /// typed so that a bad entry is skipped instead of failing the whole file.
  #[serde(default)]
  pub keys: BTreeMap<String, toml::Value>,
}

fn default_server_addr() -> String {
  "127.0.0.1:6380".to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server_addr: default_server_addr(),
      log: LogConfig::default(),
      keys: BTreeMap::new(),
    }
  }
}

impl Config {
  /// Load configuration from TOML file
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
      path: path.to_path_buf(),
      source,
    })?;

    Self::parse(&config_str).map_err(|source| Error::ConfigParse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Parse configuration from a TOML string
  pub fn parse(config_str: &str) -> std::result::Result<Self, toml::de::Error> {
    toml::from_str(config_str)
  }
}
