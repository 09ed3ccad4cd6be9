// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::documents::{CLIENTS_DOCUMENT, CONTRACTS_DOCUMENT, INVOICES_DOCUMENT};
use crate::error::ApiError;
use crate::workspace::Workspace;
use atelier::new_id;
use atelier_domain::{Client, ClientDetails, ClientUpdate, Contract, Invoice};
use atelier_events::{ChangeAction, ChangeEvent, EntityKind};
use atelier_persistence::RecoveryPolicy;
use time::OffsetDateTime;
use tracing::debug;

/// The client list.
///
/// Documents link to clients by id only, so editing or deleting a client
/// never alters what an existing document shows.
#[derive(Debug, Clone, Copy)]
pub struct ClientDirectory<'a> {
    workspace: &'a Workspace,
}

impl<'a> ClientDirectory<'a> {
    pub(crate) const fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Adds a client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is blank, or a storage error.
    pub fn create(&self, details: ClientDetails) -> Result<Client, ApiError> {
        let now = self.workspace.clock().now();
        let client = Client::new(new_id(), details, now)?;

        self.workspace.documents().update(
            &CLIENTS_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |clients: &mut Vec<Client>| {
                clients.push(client.clone());
                Ok::<_, ApiError>(())
            },
        )?;

        debug!(client_id = %client.id, "client created");
        self.publish(&client.id, ChangeAction::Created, now);
        Ok(client)
    }

    /// Applies a partial update to a client.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is unknown, `InvalidInput` if the name
    /// would become blank, or a storage error.
    pub fn update(&self, id: &str, update: ClientUpdate) -> Result<Client, ApiError> {
        let now = self.workspace.clock().now();
        let client = self.workspace.documents().update(
            &CLIENTS_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |clients: &mut Vec<Client>| {
                let client = clients
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| ApiError::not_found("Client", id))?;
                client.apply_update(update.clone(), now)?;
                Ok::<_, ApiError>(client.clone())
            },
        )?;

        debug!(client_id = %client.id, "client updated");
        self.publish(&client.id, ChangeAction::Updated, now);
        Ok(client)
    }

    /// Removes a client and clears `client_id` on every draft that pointed
    /// at it. Issued documents are frozen and keep their link as a dangling
    /// id; no snapshot is touched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is unknown, or a storage error.
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let now = self.workspace.clock().now();
        self.workspace.documents().update(
            &CLIENTS_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |clients: &mut Vec<Client>| {
                let index = clients
                    .iter()
                    .position(|c| c.id == id)
                    .ok_or_else(|| ApiError::not_found("Client", id))?;
                clients.remove(index);
                Ok::<_, ApiError>(())
            },
        )?;
        self.publish(id, ChangeAction::Deleted, now);

        let unlinked_invoices: Vec<String> = self.workspace.documents().update(
            &INVOICES_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |invoices: &mut Vec<Invoice>| {
                Ok::<_, ApiError>(
                    invoices
                        .iter_mut()
                        .filter(|invoice| {
                            invoice.is_editable() && invoice.client_id.as_deref() == Some(id)
                        })
                        .map(|invoice| {
                            invoice.client_id = None;
                            invoice.updated_at = now;
                            invoice.id.clone()
                        })
                        .collect(),
                )
            },
        )?;

        let unlinked_contracts: Vec<String> = self.workspace.documents().update(
            &CONTRACTS_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |contracts: &mut Vec<Contract>| {
                Ok::<_, ApiError>(
                    contracts
                        .iter_mut()
                        .filter(|contract| {
                            contract.is_editable() && contract.client_id.as_deref() == Some(id)
                        })
                        .map(|contract| {
                            contract.client_id = None;
                            contract.updated_at = now;
                            contract.id.clone()
                        })
                        .collect(),
                )
            },
        )?;

        debug!(
            client_id = id,
            invoices = unlinked_invoices.len(),
            contracts = unlinked_contracts.len(),
            "client deleted"
        );

        for invoice_id in unlinked_invoices {
            self.workspace.publish(&ChangeEvent::new(
                EntityKind::Invoice,
                invoice_id,
                ChangeAction::Updated,
                now,
            ));
        }
        for contract_id in unlinked_contracts {
            self.workspace.publish(&ChangeEvent::new(
                EntityKind::Contract,
                contract_id,
                ChangeAction::Updated,
                now,
            ));
        }
        Ok(())
    }

    /// Looks up a client by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn get(&self, id: &str) -> Result<Option<Client>, ApiError> {
        Ok(self
            .workspace
            .load_clients()?
            .into_iter()
            .find(|c| c.id == id))
    }

    /// All clients ordered by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn list(&self) -> Result<Vec<Client>, ApiError> {
        let mut clients = self.workspace.load_clients()?;
        clients.sort_by_cached_key(|c| (c.name.to_lowercase(), c.id.clone()));
        Ok(clients)
    }

    fn publish(&self, id: &str, action: ChangeAction, now: OffsetDateTime) {
        self.workspace.publish(&ChangeEvent::new(
            EntityKind::Client,
            id.to_string(),
            action,
            now,
        ));
    }
}
