// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier_domain::DomainError;

/// Why an invoice or contract command was rejected.
///
/// Every rejection comes from a domain rule: the freeze on issued
/// documents, the status machines, send readiness or the delete guard.
/// A rejected command never produces a new document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl CoreError {
    /// The rule that rejected the command.
    #[must_use]
    pub const fn domain_error(&self) -> &DomainError {
        match self {
            Self::DomainViolation(err) => err,
        }
    }

    /// True when the command tried to change content of an issued document.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        matches!(self.domain_error(), DomainError::FrozenEntity { .. })
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Document change rejected: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
