// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use atelier::CoreError;
use atelier_domain::DomainError;
use atelier_persistence::{PersistenceError, UnreadableReason};

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent
/// the contract with callers. [`ApiError::kind`] gives a stable category
/// name for each variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A content edit was attempted on a document that left draft.
    FrozenEntity {
        /// "Invoice" or "Contract".
        resource_type: String,
        /// The document identifier.
        id: String,
        /// The document's current status.
        status: String,
    },
    /// The requested status change is not a legal edge.
    InvalidTransition {
        /// "Invoice" or "Contract".
        resource_type: String,
        /// The document identifier.
        id: String,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// The identifier that was looked up.
        id: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A stored document is unreadable and the operation refused to
    /// overwrite it.
    StorageCorrupt {
        /// The storage key.
        key: String,
        /// What was wrong with it.
        message: String,
    },
    /// A stored document was written by a newer version.
    StorageFutureVersion {
        /// The storage key.
        key: String,
        /// The version found.
        found: u64,
        /// The newest version this build reads.
        supported: u32,
    },
    /// The storage backend failed or stayed contended.
    StorageUnavailable {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// A stable, machine-readable category for the error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::FrozenEntity { .. } => "frozen_entity",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::NotFound { .. } => "not_found",
            Self::DomainRuleViolation { .. } => "domain_rule_violation",
            Self::InvalidInput { .. } => "invalid_input",
            Self::StorageCorrupt { .. } => "storage_corrupt",
            Self::StorageFutureVersion { .. } => "storage_future_version",
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::Internal { .. } => "internal",
        }
    }

    pub(crate) fn not_found(resource_type: &str, id: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrozenEntity {
                resource_type,
                id,
                status,
            } => {
                write!(
                    f,
                    "{resource_type} '{id}' is {status} and can no longer be edited"
                )
            }
            Self::InvalidTransition {
                resource_type,
                id,
                from,
                to,
            } => {
                write!(f, "{resource_type} '{id}' cannot move from {from} to {to}")
            }
            Self::NotFound { resource_type, id } => {
                write!(f, "{resource_type} not found: {id}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::StorageCorrupt { key, message } => {
                write!(f, "Stored document '{key}' is corrupt: {message}")
            }
            Self::StorageFutureVersion {
                key,
                found,
                supported,
            } => {
                write!(
                    f,
                    "Stored document '{key}' has schema version {found}, newer than {supported}"
                )
            }
            Self::StorageUnavailable { message } => {
                write!(f, "Storage unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message = err.to_string();
    match err {
        DomainError::FrozenEntity { kind, id, status } => ApiError::FrozenEntity {
            resource_type: kind.label().to_string(),
            id,
            status,
        },
        DomainError::InvalidTransition { kind, id, from, to } => ApiError::InvalidTransition {
            resource_type: kind.label().to_string(),
            id,
            from,
            to,
        },
        DomainError::NotFound { entity, id } => ApiError::not_found(entity, &id),
        DomainError::PaymentMethodNotFound(id) => ApiError::not_found("Payment method", &id),
        DomainError::NotReadyToSend { .. } => ApiError::DomainRuleViolation {
            rule: String::from("ready_to_send"),
            message,
        },
        DomainError::DeleteNotAllowed { .. } => ApiError::DomainRuleViolation {
            rule: String::from("delete_only_drafts"),
            message,
        },
        DomainError::AmountOverflow { .. } => ApiError::DomainRuleViolation {
            rule: String::from("amount_in_range"),
            message,
        },
        DomainError::SequenceExhausted(_) => ApiError::DomainRuleViolation {
            rule: String::from("sequence_available"),
            message,
        },
        DomainError::InvalidInput { field, reason } => ApiError::InvalidInput {
            field: field.to_string(),
            message: reason,
        },
        DomainError::InvalidStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("unknown status '{status}'"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DocumentUnreadable { key, reason } => match reason {
            UnreadableReason::Corrupt(message) => ApiError::StorageCorrupt { key, message },
            UnreadableReason::FutureVersion { found, supported } => {
                ApiError::StorageFutureVersion {
                    key,
                    found,
                    supported,
                }
            }
        },
        PersistenceError::SerializationError(msg) => ApiError::Internal {
            message: format!("Serialization failed: {msg}"),
        },
        other => ApiError::StorageUnavailable {
            message: other.to_string(),
        },
    }
}
