//! # Storage Traits
//!
//! This module defines the storage abstraction the record store persists
//! through. Any substrate that can hold a string value under a string key
//! (files, an in-memory map, browser local storage) can back the tracker.

use anyhow::Result;

/// Key-value persistence substrate.
///
/// Values are always whole documents: `set` overwrites the previous value for
/// the key in one step, there are no partial or incremental writes.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Copy the raw stored value of `from` to `to`, byte for byte, whether or
    /// not it is readable text. Returns false when `from` holds nothing.
    fn copy_value(&self, from: &str, to: &str) -> Result<bool>;
}
