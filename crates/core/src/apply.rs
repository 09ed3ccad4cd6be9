// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{
    ContractCommand, ContractPatch, InvoiceCommand, InvoicePatch, NewContract, NewInvoice,
};
use crate::error::CoreError;
use crate::new_id;
use crate::snapshot::SnapshotBuilder;
use crate::state::{ContractDraft, ContractTransition, InvoiceDraft, InvoiceTransition};
use atelier_domain::{
    Contract, ContractStatus, DocumentKind, DomainError, Invoice, InvoiceLineItem, InvoiceStatus,
    LineItemInput, ScopeItem, ScopeItemInput, compute_totals, validate_line_items,
    validate_ready_to_send,
};
use atelier_events::{ChangeAction, ChangeEvent, EntityKind};
use time::OffsetDateTime;

/// Validates a create request and builds an unnumbered invoice.
///
/// # Arguments
///
/// * `request` - The caller's input
/// * `snapshots` - Source for the billing snapshot
/// * `now` - Creation timestamp
///
/// # Errors
///
/// Returns an error if a line item is invalid, an amount overflows, or the
/// requested payment method does not exist.
pub fn prepare_invoice(
    request: NewInvoice,
    snapshots: &SnapshotBuilder<'_>,
    now: OffsetDateTime,
) -> Result<InvoiceDraft, CoreError> {
    let line_items = price_line_items(request.line_items)?;
    let totals = compute_totals(&line_items, request.adjustments)?;
    let snapshot = snapshots.invoice(
        request.client_id.as_deref(),
        request.payment_method_id.as_deref(),
    )?;

    Ok(InvoiceDraft {
        invoice: Invoice {
            id: new_id(),
            number: String::new(),
            client_id: request.client_id,
            project_id: request.project_id,
            status: InvoiceStatus::Draft,
            line_items,
            subtotal: totals.subtotal,
            adjustments: request.adjustments,
            total: totals.total,
            due_date: request.due_date,
            notes: request.notes,
            snapshot,
            created_at: now,
            updated_at: now,
        },
    })
}

/// Builds an unnumbered contract.
///
/// Terms default to the profile's default contract terms.
#[must_use]
pub fn prepare_contract(
    request: NewContract,
    snapshots: &SnapshotBuilder<'_>,
    now: OffsetDateTime,
) -> ContractDraft {
    let terms = request.terms.unwrap_or_else(|| {
        snapshots
            .profile()
            .default_terms(DocumentKind::Contract)
            .to_string()
    });
    let snapshot = snapshots.contract(request.client_id.as_deref());

    ContractDraft {
        contract: Contract {
            id: new_id(),
            number: String::new(),
            client_id: request.client_id,
            project_id: request.project_id,
            status: ContractStatus::Draft,
            scope: scope_items(request.scope),
            terms,
            notes: request.notes,
            snapshot,
            created_at: now,
            updated_at: now,
        },
    }
}

/// Applies a command to an invoice, producing the new invoice and its
/// change event.
///
/// # Arguments
///
/// * `current` - The stored invoice (immutable)
/// * `command` - The change to apply
/// * `snapshots` - Used only when a draft update changes the client
/// * `now` - Timestamp for `updated_at` and the event
///
/// # Errors
///
/// Returns an error if:
/// - Content is edited outside draft (`FrozenEntity`)
/// - The status edge is not allowed (`InvalidTransition`)
/// - The invoice is not ready to send
/// - An amount overflows
pub fn apply_invoice(
    current: &Invoice,
    command: InvoiceCommand,
    snapshots: &SnapshotBuilder<'_>,
    now: OffsetDateTime,
) -> Result<InvoiceTransition, CoreError> {
    let mut invoice: Invoice = current.clone();

    let action: ChangeAction = match command {
        InvoiceCommand::Update(patch) => {
            current.ensure_editable()?;
            apply_invoice_patch(&mut invoice, patch, snapshots)?;
            ChangeAction::Updated
        }
        InvoiceCommand::MarkSent => {
            current
                .status
                .validate_transition(&current.id, InvoiceStatus::Sent)?;
            validate_ready_to_send(current)?;
            invoice.status = InvoiceStatus::Sent;
            status_changed(current.status.as_str(), invoice.status.as_str())
        }
        InvoiceCommand::MarkPaid => {
            current
                .status
                .validate_transition(&current.id, InvoiceStatus::Paid)?;
            invoice.status = InvoiceStatus::Paid;
            status_changed(current.status.as_str(), invoice.status.as_str())
        }
        InvoiceCommand::Cancel => {
            current
                .status
                .validate_transition(&current.id, InvoiceStatus::Cancelled)?;
            invoice.status = InvoiceStatus::Cancelled;
            status_changed(current.status.as_str(), invoice.status.as_str())
        }
    };

    invoice.updated_at = now;
    let event = ChangeEvent::new(EntityKind::Invoice, invoice.id.clone(), action, now);
    Ok(InvoiceTransition { invoice, event })
}

/// Applies a command to a contract, producing the new contract and its
/// change event.
///
/// Reverting to draft keeps the issued number and the snapshot.
///
/// # Errors
///
/// Returns an error if content is edited outside draft or the status edge
/// is not allowed.
pub fn apply_contract(
    current: &Contract,
    command: ContractCommand,
    snapshots: &SnapshotBuilder<'_>,
    now: OffsetDateTime,
) -> Result<ContractTransition, CoreError> {
    let mut contract: Contract = current.clone();

    let target: ContractStatus = match command {
        ContractCommand::Update(patch) => {
            current.ensure_editable()?;
            apply_contract_patch(&mut contract, patch, snapshots);
            contract.updated_at = now;
            let event = ChangeEvent::new(
                EntityKind::Contract,
                contract.id.clone(),
                ChangeAction::Updated,
                now,
            );
            return Ok(ContractTransition { contract, event });
        }
        ContractCommand::MarkSent => ContractStatus::Sent,
        ContractCommand::MarkSigned => ContractStatus::Signed,
        ContractCommand::RevertToDraft => ContractStatus::Draft,
        ContractCommand::Cancel => ContractStatus::Cancelled,
    };

    current.status.validate_transition(&current.id, target)?;
    contract.status = target;
    contract.updated_at = now;

    let event = ChangeEvent::new(
        EntityKind::Contract,
        contract.id.clone(),
        status_changed(current.status.as_str(), target.as_str()),
        now,
    );
    Ok(ContractTransition { contract, event })
}

/// Checks that an invoice may be deleted and returns the deletion event.
///
/// # Errors
///
/// Returns `DeleteNotAllowed` unless the invoice is a draft.
pub fn authorize_invoice_delete(
    invoice: &Invoice,
    now: OffsetDateTime,
) -> Result<ChangeEvent, CoreError> {
    if !invoice.is_editable() {
        return Err(CoreError::DomainViolation(DomainError::DeleteNotAllowed {
            kind: DocumentKind::Invoice,
            id: invoice.id.clone(),
            status: invoice.status.as_str().to_string(),
        }));
    }
    Ok(ChangeEvent::new(
        EntityKind::Invoice,
        invoice.id.clone(),
        ChangeAction::Deleted,
        now,
    ))
}

/// Checks that a contract may be deleted and returns the deletion event.
///
/// # Errors
///
/// Returns `DeleteNotAllowed` unless the contract is a draft.
pub fn authorize_contract_delete(
    contract: &Contract,
    now: OffsetDateTime,
) -> Result<ChangeEvent, CoreError> {
    if !contract.is_editable() {
        return Err(CoreError::DomainViolation(DomainError::DeleteNotAllowed {
            kind: DocumentKind::Contract,
            id: contract.id.clone(),
            status: contract.status.as_str().to_string(),
        }));
    }
    Ok(ChangeEvent::new(
        EntityKind::Contract,
        contract.id.clone(),
        ChangeAction::Deleted,
        now,
    ))
}

fn apply_invoice_patch(
    invoice: &mut Invoice,
    patch: InvoicePatch,
    snapshots: &SnapshotBuilder<'_>,
) -> Result<(), CoreError> {
    if let Some(inputs) = patch.line_items {
        invoice.line_items = price_line_items(inputs)?;
    }
    if let Some(adjustments) = patch.adjustments {
        invoice.adjustments = adjustments;
    }
    invoice.recompute_totals()?;

    if let Some(due_date) = patch.due_date {
        invoice.due_date = due_date;
    }
    if let Some(notes) = patch.notes {
        invoice.notes = notes;
    }
    if let Some(project_id) = patch.project_id {
        invoice.project_id = project_id;
    }
    if let Some(client_id) = patch.client_id {
        if client_id != invoice.client_id {
            invoice.snapshot =
                snapshots.invoice_for_new_client(&invoice.snapshot, client_id.as_deref());
            invoice.client_id = client_id;
        }
    }
    Ok(())
}

fn apply_contract_patch(
    contract: &mut Contract,
    patch: ContractPatch,
    snapshots: &SnapshotBuilder<'_>,
) {
    if let Some(scope) = patch.scope {
        contract.scope = scope_items(scope);
    }
    if let Some(terms) = patch.terms {
        contract.terms = terms;
    }
    if let Some(notes) = patch.notes {
        contract.notes = notes;
    }
    if let Some(project_id) = patch.project_id {
        contract.project_id = project_id;
    }
    if let Some(client_id) = patch.client_id {
        if client_id != contract.client_id {
            contract.snapshot = snapshots.contract(client_id.as_deref());
            contract.client_id = client_id;
        }
    }
}

fn price_line_items(inputs: Vec<LineItemInput>) -> Result<Vec<InvoiceLineItem>, DomainError> {
    validate_line_items(&inputs)?;
    inputs
        .into_iter()
        .map(|input| {
            let id = input.id.clone().unwrap_or_else(new_id);
            InvoiceLineItem::new(id, input)
        })
        .collect()
}

fn scope_items(inputs: Vec<ScopeItemInput>) -> Vec<ScopeItem> {
    inputs
        .into_iter()
        .map(|input| ScopeItem {
            id: input.id.unwrap_or_else(new_id),
            description: input.description,
        })
        .collect()
}

fn status_changed(from: &str, to: &str) -> ChangeAction {
    ChangeAction::StatusChanged {
        from: from.to_string(),
        to: to.to_string(),
    }
}
