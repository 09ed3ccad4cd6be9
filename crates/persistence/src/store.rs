// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Whole-document reads and optimistic read-modify-write updates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::backend::KeyValueStore;
use crate::document::{DocumentSpec, UnreadableReason, decode, encode};
use crate::error::PersistenceError;

/// Prefix under which unreadable documents are preserved.
pub const QUARANTINE_PREFIX: &str = "quarantine/";

/// Default number of compare-and-swap attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 128;

/// What an update does when the stored document cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Preserve the unreadable text and start over from an empty payload.
    Quarantine,
    /// Preserve the unreadable text and refuse to write.
    Refuse,
}

/// A record that an unreadable document was preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageWarning {
    /// The key of the unreadable document.
    pub key: String,
    /// The key its raw text was copied to.
    pub backup_key: String,
    /// Why it could not be read.
    pub reason: UnreadableReason,
}

impl std::fmt::Display for StorageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' could not be read ({}); original kept at '{}'",
            self.key, self.reason, self.backup_key
        )
    }
}

/// Reads and writes whole documents on top of a [`KeyValueStore`].
///
/// Stored text that cannot be read is never overwritten before a copy of
/// it exists under [`QUARANTINE_PREFIX`].
pub struct DocumentStore {
    kv: Arc<dyn KeyValueStore>,
    warnings: Mutex<Vec<StorageWarning>>,
    max_attempts: u32,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("max_attempts", &self.max_attempts)
            .field("warnings", &self.warnings().len())
            .finish_non_exhaustive()
    }
}

impl DocumentStore {
    /// Creates a document store over `kv`.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            warnings: Mutex::new(Vec::new()),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the number of compare-and-swap attempts per update.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Warnings recorded by this store, oldest first.
    #[must_use]
    pub fn warnings(&self) -> Vec<StorageWarning> {
        self.warning_list().clone()
    }

    /// Reads a document, or the default payload if it is absent.
    ///
    /// An unreadable document is preserved under [`QUARANTINE_PREFIX`],
    /// recorded as a warning and read as the default payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn load<T>(&self, spec: &DocumentSpec<T>) -> Result<T, PersistenceError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.kv.get(spec.key())? else {
            return Ok(T::default());
        };

        match decode(spec, &raw) {
            Ok(decoded) => Ok(decoded.payload),
            Err(reason) => {
                self.quarantine(spec.key(), &raw, reason)?;
                Ok(T::default())
            }
        }
    }

    /// Applies `mutate` to the current payload and writes the result back.
    ///
    /// The read-modify-write is retried when another writer changed the
    /// document in between, so `mutate` may run more than once and must
    /// only touch the payload it is given. An `Err` from `mutate` aborts
    /// the update without writing.
    ///
    /// # Errors
    ///
    /// Returns the error from `mutate`, a backend error, `Contention` when
    /// every attempt lost a race, or `DocumentUnreadable` when the stored
    /// document cannot be read under [`RecoveryPolicy::Refuse`].
    pub fn update<T, R, E, F>(
        &self,
        spec: &DocumentSpec<T>,
        policy: RecoveryPolicy,
        mut mutate: F,
    ) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Default,
        E: From<PersistenceError>,
        F: FnMut(&mut T) -> Result<R, E>,
    {
        let key = spec.key();

        for attempt in 1..=self.max_attempts {
            let raw: Option<String> = self.kv.get(key)?;

            let mut payload: T = match raw.as_deref() {
                None => T::default(),
                Some(text) => match decode(spec, text) {
                    Ok(decoded) => decoded.payload,
                    Err(reason) => {
                        self.quarantine(key, text, reason.clone())?;
                        if policy == RecoveryPolicy::Refuse {
                            return Err(PersistenceError::DocumentUnreadable {
                                key: key.to_string(),
                                reason,
                            }
                            .into());
                        }
                        T::default()
                    }
                },
            };

            let result: R = mutate(&mut payload)?;
            let encoded: String = encode(spec, &payload)?;

            if self.kv.compare_and_swap(key, raw.as_deref(), &encoded)? {
                return Ok(result);
            }

            debug!(key, attempt, "document changed during update, retrying");
            std::thread::yield_now();
        }

        warn!(key, attempts = self.max_attempts, "giving up on contended document");
        Err(PersistenceError::Contention {
            key: key.to_string(),
            attempts: self.max_attempts,
        }
        .into())
    }

    /// Copies `raw` to a quarantine slot and records a warning.
    ///
    /// The first slot is `quarantine/<key>`; when it already holds other
    /// text, `quarantine/<key>/<n>` is tried for increasing `n`. A slot
    /// that already holds identical text is reused.
    fn quarantine(
        &self,
        key: &str,
        raw: &str,
        reason: UnreadableReason,
    ) -> Result<String, PersistenceError> {
        let base: String = format!("{QUARANTINE_PREFIX}{key}");
        let mut backup_key: String = base.clone();
        let mut slot: u32 = 0;

        loop {
            match self.kv.get(&backup_key)? {
                Some(existing) if existing == raw => break,
                Some(_) => {
                    slot += 1;
                    backup_key = format!("{base}/{slot}");
                }
                None => {
                    if self.kv.compare_and_swap(&backup_key, None, raw)? {
                        break;
                    }
                    // Someone filled the slot first; look at it again.
                }
            }
        }

        let warning = StorageWarning {
            key: key.to_string(),
            backup_key: backup_key.clone(),
            reason,
        };
        let mut warnings = self.warning_list();
        if !warnings.contains(&warning) {
            warn!(
                key,
                backup_key = %warning.backup_key,
                reason = %warning.reason,
                "unreadable document preserved"
            );
            warnings.push(warning);
        }
        Ok(backup_key)
    }

    fn warning_list(&self) -> MutexGuard<'_, Vec<StorageWarning>> {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
