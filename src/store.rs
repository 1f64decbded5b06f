use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::input::LooseInput;

/// Name an API key is stored under. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiKeyId(String);

impl ApiKeyId {
    /// Returns `None` for an empty id
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ApiKeyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secret stored under an [`ApiKeyId`]. Never empty, redacted in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyValue(String);

impl ApiKeyValue {
    /// Returns `None` for an empty value
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() { None } else { Some(Self(value)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ApiKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKeyValue(***)")
    }
}

/// Outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The key was not a non-empty string
    InvalidKey,
    /// The key is valid but nothing was stored under it
    NotFound,
    Found(String),
}

impl Lookup {
    /// The stored value, if any
    pub fn found(self) -> Option<String> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Lookup::InvalidKey)
    }
}

/// In-memory registry of API keys.
///
/// Keys and values are always non-empty strings. Rejected input is reported
/// through return values: `set` and `has` answer `false`, `get` answers
/// [`Lookup::InvalidKey`]. Entries are only ever inserted or overwritten.
pub struct KeyStore {
    entries: RwLock<HashMap<ApiKeyId, ApiKeyValue>>,
}

impl KeyStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // `insert` is the only mutation, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ApiKeyId, ApiKeyValue>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ApiKeyId, ApiKeyValue>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set_typed(&self, key: ApiKeyId, value: ApiKeyValue) {
        self.write().insert(key, value);
    }

    pub fn get_typed(&self, key: &ApiKeyId) -> Option<String> {
        self.read().get(key).map(|value| value.as_str().to_owned())
    }

    pub fn has_typed(&self, key: &ApiKeyId) -> bool {
        self.read().contains_key(key)
    }

    /// Store `value` under `key`. Returns `false` and leaves the store
    /// untouched when either is empty.
    pub fn set(&self, key: &str, value: &str) -> bool {
        match (ApiKeyId::new(key), ApiKeyValue::new(value)) {
            (Some(key), Some(value)) => {
                self.set_typed(key, value);
                true
            }
            _ => {
                debug!("Rejected set: key and value must be non-empty strings");
                false
            }
        }
    }

    /// Look up `key`, telling an invalid key apart from a missing one
    pub fn get(&self, key: &str) -> Lookup {
        if key.is_empty() {
            debug!("Rejected get: empty key");
            return Lookup::InvalidKey;
        }

        match self.read().get(key) {
            Some(value) => Lookup::Found(value.as_str().to_owned()),
            None => Lookup::NotFound,
        }
    }

    /// Whether a non-empty value is stored under `key`
    pub fn has(&self, key: &str) -> bool {
        !key.is_empty()
            && self
                .read()
                .get(key)
                .is_some_and(|value| !value.as_str().is_empty())
    }

    /// [`KeyStore::set`] for arguments of unknown shape
    pub fn set_loose<K, V>(&self, key: &K, value: &V) -> bool
    where
        K: LooseInput + ?Sized,
        V: LooseInput + ?Sized,
    {
        match (key.as_filled_str(), value.as_filled_str()) {
            (Some(key), Some(value)) => self.set(key, value),
            _ => {
                debug!("Rejected set: key and value must be non-empty strings");
                false
            }
        }
    }

    /// [`KeyStore::get`] for a key of unknown shape
    pub fn get_loose<K: LooseInput + ?Sized>(&self, key: &K) -> Lookup {
        match key.as_filled_str() {
            Some(key) => self.get(key),
            None => {
                debug!("Rejected get: key is not a non-empty string");
                Lookup::InvalidKey
            }
        }
    }

    /// [`KeyStore::has`] for a key of unknown shape
    pub fn has_loose<K: LooseInput + ?Sized>(&self, key: &K) -> bool {
        key.as_filled_str().is_some_and(|key| self.has(key))
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore").field("len", &self.len()).finish()
    }
}
