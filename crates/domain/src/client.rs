// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::validate_client_name;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A customer of the studio.
///
/// Documents reference clients by id only. What a document shows about
/// its client comes from the snapshot taken when it was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Input for creating a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDetails {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

/// Partial update of a client's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl Client {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn new(
        id: String,
        details: ClientDetails,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        validate_client_name(&details.name)?;

        Ok(Self {
            id,
            name: details.name.trim().to_string(),
            company: details.company,
            email: details.email,
            phone: details.phone,
            address: details.address,
            notes: details.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update would blank the name. The client is
    /// left untouched in that case.
    pub fn apply_update(
        &mut self,
        update: ClientUpdate,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if let Some(name) = &update.name {
            validate_client_name(name)?;
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(company) = update.company {
            self.company = company;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        self.updated_at = now;
        Ok(())
    }
}
