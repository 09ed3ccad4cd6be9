// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier_domain::{
    BusinessIdentity, BusinessProfile, Client, ClientIdentity, ContractSnapshot, DomainError,
    InvoiceSnapshot, build_contract_snapshot, build_invoice_snapshot,
};

/// Builds document snapshots from the current profile and client list.
///
/// A client id that does not resolve produces empty client fields rather
/// than an error: the link is soft.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotBuilder<'a> {
    profile: &'a BusinessProfile,
    clients: &'a [Client],
}

impl<'a> SnapshotBuilder<'a> {
    /// Creates a builder over the given profile and clients.
    #[must_use]
    pub const fn new(profile: &'a BusinessProfile, clients: &'a [Client]) -> Self {
        Self { profile, clients }
    }

    /// The profile snapshots are taken from.
    #[must_use]
    pub const fn profile(&self) -> &'a BusinessProfile {
        self.profile
    }

    fn client(&self, client_id: Option<&str>) -> Option<&'a Client> {
        let id = client_id?;
        self.clients.iter().find(|c| c.id == id)
    }

    /// Snapshot for a new invoice.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PaymentMethodNotFound` if `payment_method_id`
    /// is not on the profile.
    pub fn invoice(
        &self,
        client_id: Option<&str>,
        payment_method_id: Option<&str>,
    ) -> Result<InvoiceSnapshot, DomainError> {
        build_invoice_snapshot(self.profile, self.client(client_id), payment_method_id)
    }

    /// Snapshot for a draft invoice whose client changed.
    ///
    /// The payment method recorded in `previous` is kept when the profile
    /// still has it; otherwise the profile default is used.
    #[must_use]
    pub fn invoice_for_new_client(
        &self,
        previous: &InvoiceSnapshot,
        client_id: Option<&str>,
    ) -> InvoiceSnapshot {
        let payment_method = previous
            .payment_method
            .as_ref()
            .and_then(|m| self.profile.payment_method(&m.id))
            .or_else(|| self.profile.default_payment_method())
            .cloned();

        InvoiceSnapshot {
            business: BusinessIdentity::from(self.profile),
            client: self
                .client(client_id)
                .map(ClientIdentity::from)
                .unwrap_or_default(),
            payment_method,
        }
    }

    /// Snapshot for a contract.
    #[must_use]
    pub fn contract(&self, client_id: Option<&str>) -> ContractSnapshot {
        build_contract_snapshot(self.profile, self.client(client_id))
    }
}
