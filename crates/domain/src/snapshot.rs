// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Billing identity captured on a document at creation time.
//!
//! Snapshots are owned values with no link back to the profile or client
//! they were copied from. Later edits to either source never reach an
//! existing document.

use crate::client::Client;
use crate::error::DomainError;
use crate::profile::{BusinessProfile, PaymentMethod};
use serde::{Deserialize, Serialize};

/// The studio's contact details as printed on a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessIdentity {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
}

/// The client's contact details as printed on a document.
///
/// All fields are empty when the document has no client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientIdentity {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Everything an issued invoice displays about who bills whom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceSnapshot {
    pub business: BusinessIdentity,
    pub client: ClientIdentity,
    pub payment_method: Option<PaymentMethod>,
}

/// Everything an issued contract displays about its parties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractSnapshot {
    pub business: BusinessIdentity,
    pub client: ClientIdentity,
}

impl From<&BusinessProfile> for BusinessIdentity {
    fn from(profile: &BusinessProfile) -> Self {
        Self {
            name: profile.name.clone(),
            address: profile.address.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            tax_id: profile.tax_id.clone(),
        }
    }
}

impl From<&Client> for ClientIdentity {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            company: client.company.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
        }
    }
}

/// Builds an invoice snapshot.
///
/// The payment method is the requested one when given, otherwise the
/// profile default, otherwise none.
///
/// # Errors
///
/// Returns `DomainError::PaymentMethodNotFound` if `payment_method_id`
/// names a method the profile does not have.
pub fn build_invoice_snapshot(
    profile: &BusinessProfile,
    client: Option<&Client>,
    payment_method_id: Option<&str>,
) -> Result<InvoiceSnapshot, DomainError> {
    let payment_method = match payment_method_id {
        Some(id) => Some(
            profile
                .payment_method(id)
                .cloned()
                .ok_or_else(|| DomainError::PaymentMethodNotFound(id.to_string()))?,
        ),
        None => profile.default_payment_method().cloned(),
    };

    Ok(InvoiceSnapshot {
        business: BusinessIdentity::from(profile),
        client: client.map(ClientIdentity::from).unwrap_or_default(),
        payment_method,
    })
}

/// Builds a contract snapshot. A missing client yields empty client fields.
#[must_use]
pub fn build_contract_snapshot(
    profile: &BusinessProfile,
    client: Option<&Client>,
) -> ContractSnapshot {
    ContractSnapshot {
        business: BusinessIdentity::from(profile),
        client: client.map(ClientIdentity::from).unwrap_or_default(),
    }
}
