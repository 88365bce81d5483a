//! The boundary to wherever scanned payloads are kept between scanning and display.
//!
//! Stores hold the raw provisioning text exactly as scanned, not decoded bytes, so that the same
//! decoding rules apply however long the text has been stored. Whether a store encrypts at rest
//! is its own business.

use std::collections::HashMap;

use log::debug;

use crate::{extract_secret, RawSecret, Result};

/// Key scanned payloads are stored under unless a caller picks another.
pub const DEFAULT_SECRET_KEY: &str = "secret";

/// Synchronous string key/value storage.
pub trait SecretStore {
    fn put(&mut self, key: &str, value: String);
    fn get(&self, key: &str) -> Option<String>;
}

/// A [`SecretStore`] that lives only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemoryStore {
    fn put(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Read the payload stored under `key` and decode its secret.
///
/// An absent key, like a payload with no secret field, yields an empty [`RawSecret`].
///
/// # Errors
///
/// [`Error::SecretUnreadable`](crate::Error::SecretUnreadable) as for [`extract_secret`].
pub fn load_secret<S: SecretStore + ?Sized>(store: &S, key: &str) -> Result<RawSecret> {
    match store.get(key) {
        Some(payload) => extract_secret(&payload),
        None => {
            debug!("nothing stored under {:?}", key);
            Ok(RawSecret::empty())
        }
    }
}
