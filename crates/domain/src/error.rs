// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::DocumentKind;

/// Errors raised by domain rules.
///
/// Every variant is recoverable: callers inspect it and decide what to
/// tell the user. None of these indicate corrupted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A content mutation was attempted on a document that left draft.
    FrozenEntity {
        /// The kind of document.
        kind: DocumentKind,
        /// The document identifier.
        id: String,
        /// The current status.
        status: String,
    },
    /// The requested status edge is not permitted.
    InvalidTransition {
        /// The kind of document.
        kind: DocumentKind,
        /// The document identifier.
        id: String,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// An entity with the given identifier does not exist.
    NotFound {
        /// The entity type ("Invoice", "Client", ...).
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
    /// The document does not satisfy the content rules for sending.
    NotReadyToSend {
        /// The document identifier.
        id: String,
        /// Why it cannot be sent.
        reason: String,
    },
    /// Deletion is only permitted in draft.
    DeleteNotAllowed {
        /// The kind of document.
        kind: DocumentKind,
        /// The document identifier.
        id: String,
        /// The current status.
        status: String,
    },
    /// A money computation left the representable range.
    AmountOverflow {
        /// Description of the computation that overflowed.
        operation: String,
    },
    /// A sequence counter cannot advance any further.
    SequenceExhausted(DocumentKind),
    /// The referenced payment method is not on the profile.
    PaymentMethodNotFound(String),
    /// A field value is invalid.
    InvalidInput {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A status string could not be parsed.
    InvalidStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrozenEntity { kind, id, status } => {
                write!(
                    f,
                    "{} '{id}' is {status} and can no longer be edited",
                    kind.label()
                )
            }
            Self::InvalidTransition { kind, id, from, to } => {
                write!(
                    f,
                    "{} '{id}' cannot move from {from} to {to}",
                    kind.label()
                )
            }
            Self::NotFound { entity, id } => write!(f, "{entity} '{id}' not found"),
            Self::NotReadyToSend { id, reason } => {
                write!(f, "Document '{id}' is not ready to send: {reason}")
            }
            Self::DeleteNotAllowed { kind, id, status } => {
                write!(
                    f,
                    "{} '{id}' is {status}; only drafts can be deleted",
                    kind.label()
                )
            }
            Self::AmountOverflow { operation } => {
                write!(f, "Amount overflow while {operation}")
            }
            Self::SequenceExhausted(kind) => {
                write!(f, "The {kind} sequence counter is exhausted")
            }
            Self::PaymentMethodNotFound(id) => write!(f, "Payment method '{id}' not found"),
            Self::InvalidInput { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Self::InvalidStatus(status) => write!(f, "Invalid status: {status}"),
        }
    }
}

impl std::error::Error for DomainError {}
