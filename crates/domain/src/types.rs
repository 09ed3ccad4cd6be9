// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Calendar dates are stored as `YYYY-MM-DD` strings.
time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// The two kinds of numbered documents.
///
/// Each kind owns an independent sequence counter and number template
/// on the business profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A billing document.
    Invoice,
    /// A scope-of-work agreement.
    Contract,
}

impl DocumentKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Contract => "contract",
        }
    }

    /// Returns the human-readable label used in error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::Contract => "Contract",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(Self::Invoice),
            "contract" => Ok(Self::Contract),
            _ => Err(DomainError::InvalidInput {
                field: "kind",
                reason: format!("unknown document kind '{s}'"),
            }),
        }
    }
}
