//! Errors for the layers around the registry (config loading, networking).
//!
//! Registry operations themselves never fail: rejected input is reported
//! through their return values.

use std::path::PathBuf;

/// Crate error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Config file could not be read
  #[error("failed to read config file '{}': {source}", .path.display())]
  ConfigRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Config file is not valid TOML for [`crate::config::Config`]
  #[error("failed to parse config file '{}': {source}", .path.display())]
  ConfigParse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
