// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Atelier.
//!
//! Each collection (profile, clients, invoices, contracts) is one JSON
//! document stored under one key. Writers never lock a document; they
//! read it, change a copy and write it back with compare-and-swap,
//! retrying when another writer got there first.
//!
//! ## Backends
//!
//! - **`MemoryStore`**: in-process map for tests and throwaway sessions
//! - **`SqliteStore`**: Diesel over `SQLite`, with embedded migrations
//!
//! ## Unreadable documents
//!
//! A document that fails to parse, or that declares a newer schema
//! version, is copied to `quarantine/<key>` before anything else happens
//! to it. See [`DocumentStore`] for how reads and writes proceed after
//! that.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod document;
mod error;
mod store;

#[cfg(test)]
mod tests;

pub use backend::KeyValueStore;
pub use backend::memory::MemoryStore;
pub use backend::sqlite::SqliteStore;
pub use document::{
    Decoded, DocumentSpec, SCHEMA_VERSION, SCHEMA_VERSION_FIELD, UnreadableReason, decode, encode,
};
pub use error::PersistenceError;
pub use store::{
    DEFAULT_MAX_ATTEMPTS, DocumentStore, QUARANTINE_PREFIX, RecoveryPolicy, StorageWarning,
};
