// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::documents::CONTRACTS_DOCUMENT;
use crate::error::ApiError;
use crate::workspace::Workspace;
use atelier::{
    ContractCommand, ContractPatch, ContractTransition, NewContract, SnapshotBuilder,
    apply_contract, authorize_contract_delete, prepare_contract,
};
use atelier_domain::{Contract, ContractStatus, DocumentKind};
use atelier_persistence::RecoveryPolicy;
use tracing::debug;

/// Creates, edits, moves and queries contracts.
#[derive(Debug, Clone, Copy)]
pub struct ContractManager<'a> {
    workspace: &'a Workspace,
}

impl<'a> ContractManager<'a> {
    pub(crate) const fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Creates a numbered draft contract. Terms default to the profile's
    /// default contract terms.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is unreadable (numbering is
    /// refused) or the store fails.
    pub fn create(&self, request: NewContract) -> Result<Contract, ApiError> {
        let profile = self.workspace.load_profile()?;
        let clients = self.workspace.load_clients()?;
        let snapshots = SnapshotBuilder::new(&profile, &clients);
        let draft = prepare_contract(request, &snapshots, self.workspace.clock().now());

        let issued = self.workspace.sequences().issue(DocumentKind::Contract)?;
        let ContractTransition { contract, event } = draft.issue(issued.number);

        self.workspace.documents().update(
            &CONTRACTS_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |contracts: &mut Vec<Contract>| {
                contracts.push(contract.clone());
                Ok::<_, ApiError>(())
            },
        )?;

        debug!(contract_id = %contract.id, number = %contract.number, "contract created");
        self.workspace.publish(&event);
        Ok(contract)
    }

    /// Edits a draft contract's content.
    ///
    /// # Errors
    ///
    /// Returns `FrozenEntity` unless the contract is a draft, `NotFound`
    /// for an unknown id, or a storage error.
    pub fn update(&self, id: &str, patch: ContractPatch) -> Result<Contract, ApiError> {
        self.apply(id, ContractCommand::Update(patch))
    }

    /// Moves a draft to sent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the contract is a draft.
    pub fn mark_sent(&self, id: &str) -> Result<Contract, ApiError> {
        self.apply(id, ContractCommand::MarkSent)
    }

    /// Moves a sent contract to signed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the contract is sent.
    pub fn mark_signed(&self, id: &str) -> Result<Contract, ApiError> {
        self.apply(id, ContractCommand::MarkSigned)
    }

    /// Returns a sent contract to draft for further edits.
    ///
    /// The number and snapshot are kept.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the contract is sent.
    pub fn revert_to_draft(&self, id: &str) -> Result<Contract, ApiError> {
        self.apply(id, ContractCommand::RevertToDraft)
    }

    /// Cancels a draft or sent contract.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the contract is signed or cancelled.
    pub fn cancel(&self, id: &str) -> Result<Contract, ApiError> {
        self.apply(id, ContractCommand::Cancel)
    }

    /// Deletes a draft contract.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id or a `delete_only_drafts` rule
    /// violation once the contract has left draft.
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let now = self.workspace.clock().now();
        let event = self.workspace.documents().update(
            &CONTRACTS_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |contracts: &mut Vec<Contract>| {
                let index = contracts
                    .iter()
                    .position(|contract| contract.id == id)
                    .ok_or_else(|| ApiError::not_found("Contract", id))?;
                let event = authorize_contract_delete(&contracts[index], now)?;
                contracts.remove(index);
                Ok::<_, ApiError>(event)
            },
        )?;

        debug!(contract_id = id, "contract deleted");
        self.workspace.publish(&event);
        Ok(())
    }

    /// Looks up a contract by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn get(&self, id: &str) -> Result<Option<Contract>, ApiError> {
        Ok(self.load()?.into_iter().find(|contract| contract.id == id))
    }

    /// All contracts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn all(&self) -> Result<Vec<Contract>, ApiError> {
        self.filtered(|_| true)
    }

    /// Contracts linked to `client_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn by_client(&self, client_id: &str) -> Result<Vec<Contract>, ApiError> {
        self.filtered(|contract| contract.client_id.as_deref() == Some(client_id))
    }

    /// Contracts linked to `project_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn by_project(&self, project_id: &str) -> Result<Vec<Contract>, ApiError> {
        self.filtered(|contract| contract.project_id.as_deref() == Some(project_id))
    }

    /// Contracts in `status`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn by_status(&self, status: ContractStatus) -> Result<Vec<Contract>, ApiError> {
        self.filtered(|contract| contract.status == status)
    }

    fn apply(&self, id: &str, command: ContractCommand) -> Result<Contract, ApiError> {
        let profile = self.workspace.load_profile()?;
        let clients = self.workspace.load_clients()?;
        let snapshots = SnapshotBuilder::new(&profile, &clients);
        let now = self.workspace.clock().now();

        let ContractTransition { contract, event } = self.workspace.documents().update(
            &CONTRACTS_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |contracts: &mut Vec<Contract>| {
                let slot = contracts
                    .iter_mut()
                    .find(|contract| contract.id == id)
                    .ok_or_else(|| ApiError::not_found("Contract", id))?;
                let transition = apply_contract(slot, command.clone(), &snapshots, now)?;
                *slot = transition.contract.clone();
                Ok::<_, ApiError>(transition)
            },
        )?;

        debug!(contract_id = %contract.id, action = event.action.name(), "contract changed");
        self.workspace.publish(&event);
        Ok(contract)
    }

    fn load(&self) -> Result<Vec<Contract>, ApiError> {
        Ok(self.workspace.documents().load(&CONTRACTS_DOCUMENT)?)
    }

    fn filtered<P>(&self, predicate: P) -> Result<Vec<Contract>, ApiError>
    where
        P: Fn(&Contract) -> bool,
    {
        let mut contracts: Vec<Contract> = self
            .load()?
            .into_iter()
            .rev()
            .filter(|contract| predicate(contract))
            .collect();
        contracts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contracts)
    }
}
