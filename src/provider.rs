//! Configuration-phase and running-phase handles over one [`KeyStore`]
//!
//! The hosting application builds an [`ApiKeysProvider`] once, uses it to
//! seed keys while it is being configured, then hands [`ApiKeys`] instances
//! to whatever runs afterwards. All of them share the same store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::input::LooseInput;
use crate::store::{KeyStore, Lookup};

/// Configuration-phase handle, and factory for [`ApiKeys`]
#[derive(Debug, Default)]
pub struct ApiKeysProvider {
    store: Arc<KeyStore>,
}

impl ApiKeysProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store
    pub fn with_store(store: Arc<KeyStore>) -> Self {
        Self { store }
    }

    pub fn set(&self, key: &str, value: &str) -> bool {
        self.store.set(key, value)
    }

    pub fn get(&self, key: &str) -> Lookup {
        self.store.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.store.has(key)
    }

    pub fn set_loose<K, V>(&self, key: &K, value: &V) -> bool
    where
        K: LooseInput + ?Sized,
        V: LooseInput + ?Sized,
    {
        self.store.set_loose(key, value)
    }

    pub fn get_loose<K: LooseInput + ?Sized>(&self, key: &K) -> Lookup {
        self.store.get_loose(key)
    }

    pub fn has_loose<K: LooseInput + ?Sized>(&self, key: &K) -> bool {
        self.store.has_loose(key)
    }

    /// Store every valid entry of the config's `[keys]` table.
    ///
    /// Entries whose name or value is not a non-empty string are skipped.
    /// Returns the number of entries stored.
    pub fn seed(&self, config: &Config) -> usize {
        let mut stored = 0;
        for (key, value) in &config.keys {
            if self.set_loose(key.as_str(), value) {
                stored += 1;
            } else {
                warn!(
                    key = %key,
                    "Skipping API key entry: key and value must be non-empty strings"
                );
            }
        }

        info!("Seeded {} of {} configured API keys", stored, config.keys.len());
        stored
    }

    /// Running-phase handle over the same store
    pub fn instance(&self) -> ApiKeys {
        ApiKeys {
            store: Arc::clone(&self.store),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Running-phase handle. Clones share the store.
#[derive(Debug, Clone)]
pub struct ApiKeys {
    store: Arc<KeyStore>,
}

impl ApiKeys {
    pub fn set(&self, key: &str, value: &str) -> bool {
        self.store.set(key, value)
    }

    pub fn get(&self, key: &str) -> Lookup {
        self.store.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.store.has(key)
    }

    pub fn set_loose<K, V>(&self, key: &K, value: &V) -> bool
    where
        K: LooseInput + ?Sized,
        V: LooseInput + ?Sized,
    {
        self.store.set_loose(key, value)
    }

    pub fn get_loose<K: LooseInput + ?Sized>(&self, key: &K) -> Lookup {
        self.store.get_loose(key)
    }

    pub fn has_loose<K: LooseInput + ?Sized>(&self, key: &K) -> bool {
        self.store.has_loose(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_KEY: &str = "test";
    const VALID_VALUE: &str = "1234567890";

    #[test]
    fn test_provider_set_has_get() {
        let provider = ApiKeysProvider::new();

        assert!(provider.set(VALID_KEY, VALID_VALUE));
        assert!(provider.has(VALID_KEY));
        assert_eq!(provider.get(VALID_KEY), Lookup::Found(VALID_VALUE.to_string()));
    }

    #[test]
    fn test_values_set_in_configuration_phase_are_visible_at_runtime() {
        let provider = ApiKeysProvider::new();
        let instance = provider.instance();

        provider.set(VALID_KEY, VALID_VALUE);

        assert!(instance.has(VALID_KEY));
        assert_eq!(instance.get(VALID_KEY), Lookup::Found(VALID_VALUE.to_string()));
    }

    #[test]
    fn test_values_set_at_runtime_are_visible_everywhere() {
        let provider = ApiKeysProvider::new();
        let first = provider.instance();
        let second = first.clone();

        assert!(first.set(VALID_KEY, VALID_VALUE));

        assert!(provider.has(VALID_KEY));
        assert_eq!(second.get(VALID_KEY).found(), Some(VALID_VALUE.to_string()));
        assert_eq!(provider.instance().get(VALID_KEY).found(), Some(VALID_VALUE.to_string()));
    }

    #[test]
    fn test_separate_providers_do_not_share() {
        let a = ApiKeysProvider::new();
        let b = ApiKeysProvider::new();

        a.set(VALID_KEY, VALID_VALUE);

        assert_eq!(b.get(VALID_KEY), Lookup::NotFound);
    }

    #[test]
    fn test_with_store() {
        let store = Arc::new(KeyStore::new());
        store.set(VALID_KEY, VALID_VALUE);

        let provider = ApiKeysProvider::with_store(Arc::clone(&store));

        assert!(provider.instance().has(VALID_KEY));
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_loose_inputs_through_handles() {
        let provider = ApiKeysProvider::new();
        let instance = provider.instance();

        assert!(!provider.set_loose(&serde_json::json!(1), VALID_VALUE));
        assert!(provider.set_loose(&serde_json::json!(VALID_KEY), &serde_json::json!(VALID_VALUE)));
        assert!(instance.has_loose(&serde_json::json!(VALID_KEY)));
        assert!(instance.get_loose(&serde_json::json!(null)).is_invalid_key());
        assert!(!instance.has_loose(&serde_json::json!([VALID_KEY])));
    }

    #[test]
    fn test_seed_skips_invalid_entries() {
        let config = Config::parse(
            r#"
[keys]
maps = "AIza-123"
analytics = "UA-1234"
empty = ""
port = 8080
enabled = true
list = ["a"]
"" = "no-name"

[keys.nested]
a = "a"
"#,
        )
        .unwrap();

        let provider = ApiKeysProvider::new();
        let stored = provider.seed(&config);

        assert_eq!(stored, 2);
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.get("maps").found(), Some("AIza-123".to_string()));
        assert!(provider.instance().has("analytics"));
        assert_eq!(provider.get("empty"), Lookup::NotFound);
        assert_eq!(provider.get("port"), Lookup::NotFound);
        assert_eq!(provider.get("nested"), Lookup::NotFound);
    }

    #[test]
    fn test_seed_empty_config() {
        let provider = ApiKeysProvider::new();
        assert_eq!(provider.seed(&Config::default()), 0);
        assert!(provider.is_empty());
    }
}
