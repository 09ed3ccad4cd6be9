// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-backed key-value store.
//!
//! Raw SQL is limited to PRAGMA statements, which Diesel has no DSL for.
//! Compare-and-swap runs inside an IMMEDIATE transaction, which takes the
//! database write lock before reading, so it is atomic across every
//! connection and process using the same file.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use diesel::prelude::*;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::backend::KeyValueStore;
use crate::data_models::NewKvEntry;
use crate::diesel_schema::kv_entries;
use crate::error::PersistenceError;

/// SQLite migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits for another writer's lock, in milliseconds.
pub const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Run pending migrations on the provided connection.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    Ok(())
}

/// Initialize a `SQLite` database at the given URL and run migrations.
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (e.g., `":memory:"` or file path)
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    set_busy_timeout(&mut conn, BUSY_TIMEOUT_MS)?;
    run_migrations(&mut conn)?;

    Ok(conn)
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}

/// Sets how long a connection waits on a locked database before failing.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn set_busy_timeout(conn: &mut SqliteConnection, millis: u32) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query(format!("PRAGMA busy_timeout = {millis}"))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}

/// A key-value store in a `SQLite` database.
pub struct SqliteStore {
    conn: Mutex<SqliteConnection>,
    location: String,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Creates a store backed by a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:atelier_mem_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = initialize_database(&shared_memory_url)?;
        Ok(Self {
            conn: Mutex::new(conn),
            location: shared_memory_url,
        })
    }

    /// Opens (or creates) a store in the database file at `path`.
    ///
    /// Several stores, in one process or many, may open the same file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database
    /// cannot be initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = initialize_database(path_str)?;
        enable_wal_mode(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            location: path_str.to_string(),
        })
    }

    /// Where this store lives: a file path or an in-memory URL.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    fn conn(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_value(conn: &mut SqliteConnection, key: &str) -> Result<Option<String>, PersistenceError> {
    Ok(kv_entries::table
        .find(key)
        .select(kv_entries::value)
        .first::<String>(conn)
        .optional()?)
}

fn write_value(
    conn: &mut SqliteConnection,
    key: &str,
    value: &str,
) -> Result<(), PersistenceError> {
    let updated_at: String = OffsetDateTime::now_utc().format(&Rfc3339)?;
    diesel::replace_into(kv_entries::table)
        .values(&NewKvEntry {
            key,
            value,
            updated_at: &updated_at,
        })
        .execute(conn)?;
    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        read_value(&mut self.conn(), key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        write_value(&mut self.conn(), key, value)
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, PersistenceError> {
        let mut conn = self.conn();
        let swapped = conn.immediate_transaction(|conn| {
            let current: Option<String> = read_value(conn, key)?;
            if current.as_deref() != expected {
                return Ok::<bool, PersistenceError>(false);
            }
            write_value(conn, key, new)?;
            Ok(true)
        })?;

        if !swapped {
            debug!(key, "compare-and-swap lost to a concurrent writer");
        }
        Ok(swapped)
    }

    fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(kv_entries::table
            .select(kv_entries::key)
            .order(kv_entries::key.asc())
            .load::<String>(&mut *self.conn())?)
    }
}
