// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Key-value backends.
//!
//! Documents are stored as opaque strings under string keys. Backends know
//! nothing about the JSON inside; envelope handling lives in
//! [`crate::document`].
//!
//! ## Backend Support
//!
//! - `memory`: mutex-guarded map, for tests and throwaway workspaces
//! - `sqlite`: Diesel `SqliteConnection` with embedded migrations

pub mod memory;
pub mod sqlite;

use crate::error::PersistenceError;

/// A string key-value store with an atomic compare-and-swap.
///
/// Every multi-step update in the workspace is built on
/// [`KeyValueStore::compare_and_swap`], so an implementation must make it
/// atomic with respect to every other writer of the same store, including
/// writers in other processes when the store is shared.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key` unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Stores `new` under `key` only if the current value equals `expected`
    /// (`None` meaning "absent").
    ///
    /// Returns `Ok(false)` without writing when the current value differs.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, PersistenceError>;

    /// Lists every stored key in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn keys(&self) -> Result<Vec<String>, PersistenceError>;
}
