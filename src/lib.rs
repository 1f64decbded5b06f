//! In-memory registry of API keys
//!
//! A [`KeyStore`] maps non-empty string ids to non-empty string values. An
//! application reaches it through an [`ApiKeysProvider`] while it is being
//! configured and through [`ApiKeys`] instances once it runs; both views share
//! the same entries.
//!
//! ```
//! use apikeys::{ApiKeysProvider, Lookup};
//!
//! let provider = ApiKeysProvider::new();
//! assert!(provider.set("maps", "AIza-123"));
//! assert!(!provider.set("", "orphan"));
//!
//! let keys = provider.instance();
//! assert_eq!(keys.get("maps"), Lookup::Found("AIza-123".to_string()));
//! assert_eq!(keys.get("analytics"), Lookup::NotFound);
//! assert_eq!(keys.get(""), Lookup::InvalidKey);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod protocol;
pub mod provider;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use input::LooseInput;
pub use provider::{ApiKeys, ApiKeysProvider};
pub use store::{ApiKeyId, ApiKeyValue, KeyStore, Lookup};
