// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::snapshot::ContractSnapshot;
use crate::status::ContractStatus;
use crate::types::DocumentKind;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One deliverable in a contract's scope of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeItem {
    pub id: String,
    pub description: String,
}

/// Caller-supplied scope content. `id` is kept when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeItemInput {
    pub id: Option<String>,
    pub description: String,
}

/// A numbered scope-of-work agreement with a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub number: String,
    pub client_id: Option<String>,
    pub project_id: Option<String>,
    pub status: ContractStatus,
    pub scope: Vec<ScopeItem>,
    pub terms: String,
    pub notes: String,
    pub snapshot: ContractSnapshot,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Contract {
    /// Returns true while content fields may change.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    /// Fails with `FrozenEntity` unless the contract is a draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::FrozenEntity` if the contract left draft.
    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.is_editable() {
            return Ok(());
        }
        Err(DomainError::FrozenEntity {
            kind: DocumentKind::Contract,
            id: self.id.clone(),
            status: self.status.as_str().to_string(),
        })
    }
}
