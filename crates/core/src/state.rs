// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier_domain::{Contract, Invoice};
use atelier_events::{ChangeAction, ChangeEvent, EntityKind};

/// The result of a successful invoice transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The input invoice is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceTransition {
    /// The invoice after the transition.
    pub invoice: Invoice,
    /// The change event to publish once the invoice is stored.
    pub event: ChangeEvent,
}

/// The result of a successful contract transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractTransition {
    /// The contract after the transition.
    pub contract: Contract,
    /// The change event to publish once the contract is stored.
    pub event: ChangeEvent,
}

/// A validated invoice that has not been numbered yet.
///
/// Creating a draft consumes nothing. Only [`InvoiceDraft::issue`] needs a
/// number, so callers can validate before touching the sequence counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub(crate) invoice: Invoice,
}

impl InvoiceDraft {
    /// The id the invoice will be stored under.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.invoice.id
    }

    /// Assigns the issued number and produces the creation transition.
    #[must_use]
    pub fn issue(self, number: String) -> InvoiceTransition {
        let mut invoice = self.invoice;
        invoice.number = number;
        let event = ChangeEvent::new(
            EntityKind::Invoice,
            invoice.id.clone(),
            ChangeAction::Created,
            invoice.created_at,
        );
        InvoiceTransition { invoice, event }
    }
}

/// A validated contract that has not been numbered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDraft {
    pub(crate) contract: Contract,
}

impl ContractDraft {
    /// The id the contract will be stored under.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.contract.id
    }

    /// Assigns the issued number and produces the creation transition.
    #[must_use]
    pub fn issue(self, number: String) -> ContractTransition {
        let mut contract = self.contract;
        contract.number = number;
        let event = ChangeEvent::new(
            EntityKind::Contract,
            contract.id.clone(),
            ChangeAction::Created,
            contract.created_at,
        );
        ContractTransition { contract, event }
    }
}
