// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document status states and their permitted transitions.
//!
//! Content is editable only in `Draft`. Every other state freezes the
//! document; the only way back is the contract `Sent -> Draft` revert.

use crate::error::DomainError;
use crate::types::DocumentKind;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being prepared. Full editing allowed.
    #[default]
    Draft,
    /// Issued to the client. Frozen.
    Sent,
    /// Settled. Terminal.
    Paid,
    /// Withdrawn. Terminal.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if content fields may be changed in this status.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Sent
    /// - Sent → Paid
    /// - Draft → Cancelled
    /// - Sent → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Sent)
                | (Self::Sent, Self::Paid)
                | (Self::Draft | Self::Sent, Self::Cancelled)
        )
    }

    /// Validates a transition for the invoice with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the edge is not permitted.
    pub fn validate_transition(&self, id: &str, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                kind: DocumentKind::Invoice,
                id: id.to_string(),
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Being prepared. Full editing allowed.
    #[default]
    Draft,
    /// Issued for signature. Frozen, but may be reverted to draft.
    Sent,
    /// Countersigned. Terminal.
    Signed,
    /// Withdrawn. Terminal.
    Cancelled,
}

impl ContractStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Signed => "signed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if content fields may be changed in this status.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Signed | Self::Cancelled)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Sent
    /// - Sent → Signed
    /// - Sent → Draft (correction before signature)
    /// - Draft → Cancelled
    /// - Sent → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Sent)
                | (Self::Sent, Self::Signed | Self::Draft)
                | (Self::Draft | Self::Sent, Self::Cancelled)
        )
    }

    /// Validates a transition for the contract with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the edge is not permitted.
    pub fn validate_transition(&self, id: &str, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                kind: DocumentKind::Contract,
                id: id.to_string(),
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "signed" => Ok(Self::Signed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}
