// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Versioned JSON envelopes.
//!
//! Every stored document has the shape
//! `{"schemaVersion": <u32>, "<field>": <payload>}`. Documents written
//! before the envelope existed (a bare JSON array) read as version 0 and
//! are rewritten in the envelope on their next write. Any other value
//! without a version is corrupt.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::PersistenceError;

/// The envelope version this build writes and the newest it can read.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the version field in the envelope.
pub const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

/// Where a document lives and which envelope field holds its payload.
pub struct DocumentSpec<T> {
    key: &'static str,
    field: &'static str,
    accepts_legacy_array: bool,
    payload: PhantomData<fn() -> T>,
}

impl<T> DocumentSpec<T> {
    /// Creates a document spec. A bare JSON array stored under `key` is
    /// read as version 0.
    #[must_use]
    pub const fn new(key: &'static str, field: &'static str) -> Self {
        Self {
            key,
            field,
            accepts_legacy_array: true,
            payload: PhantomData,
        }
    }

    /// Same document, but only the envelope is readable. For payloads that
    /// were never stored bare.
    #[must_use]
    pub const fn envelope_only(self) -> Self {
        Self {
            accepts_legacy_array: false,
            ..self
        }
    }

    /// The storage key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// The envelope field holding the payload.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }
}

impl<T> Clone for DocumentSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DocumentSpec<T> {}

impl<T> std::fmt::Debug for DocumentSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSpec")
            .field("key", &self.key)
            .field("field", &self.field)
            .field("accepts_legacy_array", &self.accepts_legacy_array)
            .finish()
    }
}

/// Why a stored document could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreadableReason {
    /// The text is not valid JSON or does not match the payload type.
    Corrupt(String),
    /// The document was written by a newer build.
    FutureVersion {
        /// The version found in the document.
        found: u64,
        /// The newest version this build understands.
        supported: u32,
    },
}

impl std::fmt::Display for UnreadableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corrupt(msg) => write!(f, "corrupt document: {msg}"),
            Self::FutureVersion { found, supported } => write!(
                f,
                "schema version {found} is newer than supported version {supported}"
            ),
        }
    }
}

/// A successfully read document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// The payload.
    pub payload: T,
    /// The envelope version it was stored with. 0 for pre-envelope data.
    pub version: u32,
}

/// Reads a stored document.
///
/// # Errors
///
/// Returns the reason the document cannot be read. The raw text is never
/// modified here; preserving it is the caller's job.
pub fn decode<T: DeserializeOwned>(
    spec: &DocumentSpec<T>,
    raw: &str,
) -> Result<Decoded<T>, UnreadableReason> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| UnreadableReason::Corrupt(e.to_string()))?;

    let (version, payload) = match value {
        Value::Object(mut object) if object.contains_key(SCHEMA_VERSION_FIELD) => {
            let found = object
                .get(SCHEMA_VERSION_FIELD)
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    UnreadableReason::Corrupt(format!(
                        "'{SCHEMA_VERSION_FIELD}' is not an unsigned integer"
                    ))
                })?;
            if found > u64::from(SCHEMA_VERSION) {
                return Err(UnreadableReason::FutureVersion {
                    found,
                    supported: SCHEMA_VERSION,
                });
            }
            let payload = object.remove(spec.field()).ok_or_else(|| {
                UnreadableReason::Corrupt(format!("missing field '{}'", spec.field()))
            })?;
            // `found` is at most SCHEMA_VERSION here.
            (u32::try_from(found).unwrap_or(SCHEMA_VERSION), payload)
        }
        legacy @ Value::Array(_) if spec.accepts_legacy_array => (0, legacy),
        _ => {
            return Err(UnreadableReason::Corrupt(format!(
                "document has no '{SCHEMA_VERSION_FIELD}' field"
            )));
        }
    };

    let payload: T =
        serde_json::from_value(payload).map_err(|e| UnreadableReason::Corrupt(e.to_string()))?;
    Ok(Decoded { payload, version })
}

/// Serializes a payload into the current envelope.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn encode<T: Serialize>(
    spec: &DocumentSpec<T>,
    payload: &T,
) -> Result<String, PersistenceError> {
    let mut envelope: Map<String, Value> = Map::new();
    envelope.insert(
        SCHEMA_VERSION_FIELD.to_string(),
        Value::from(SCHEMA_VERSION),
    );
    envelope.insert(spec.field().to_string(), serde_json::to_value(payload)?);
    Ok(serde_json::to_string(&Value::Object(envelope))?)
}
