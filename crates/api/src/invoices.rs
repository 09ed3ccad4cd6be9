// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::documents::INVOICES_DOCUMENT;
use crate::error::ApiError;
use crate::workspace::Workspace;
use atelier::{
    InvoiceCommand, InvoicePatch, InvoiceTransition, NewInvoice, SnapshotBuilder, apply_invoice,
    authorize_invoice_delete, prepare_invoice,
};
use atelier_domain::{DocumentKind, Invoice, InvoiceStatus};
use atelier_persistence::RecoveryPolicy;
use time::Date;
use tracing::debug;

/// Creates, edits, moves and queries invoices.
///
/// Every mutation is a compare-and-swap on the invoice collection; callers
/// only ever receive owned copies.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceManager<'a> {
    workspace: &'a Workspace,
}

impl<'a> InvoiceManager<'a> {
    pub(crate) const fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Creates a numbered draft invoice.
    ///
    /// The request is validated before a sequence value is consumed, so a
    /// rejected request never burns a number.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A line item is invalid or an amount overflows
    /// - The payment method does not exist
    /// - The profile is unreadable (numbering is refused)
    /// - The store fails
    pub fn create(&self, request: NewInvoice) -> Result<Invoice, ApiError> {
        let profile = self.workspace.load_profile()?;
        let clients = self.workspace.load_clients()?;
        let snapshots = SnapshotBuilder::new(&profile, &clients);
        let draft = prepare_invoice(request, &snapshots, self.workspace.clock().now())?;

        let issued = self.workspace.sequences().issue(DocumentKind::Invoice)?;
        let InvoiceTransition { invoice, event } = draft.issue(issued.number);

        self.workspace.documents().update(
            &INVOICES_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |invoices: &mut Vec<Invoice>| {
                invoices.push(invoice.clone());
                Ok::<_, ApiError>(())
            },
        )?;

        debug!(invoice_id = %invoice.id, number = %invoice.number, "invoice created");
        self.workspace.publish(&event);
        Ok(invoice)
    }

    /// Edits a draft invoice's content.
    ///
    /// # Errors
    ///
    /// Returns `FrozenEntity` unless the invoice is a draft, `NotFound` for
    /// an unknown id, or a validation or storage error.
    pub fn update(&self, id: &str, patch: InvoicePatch) -> Result<Invoice, ApiError> {
        self.apply(id, InvoiceCommand::Update(patch))
    }

    /// Moves a draft to sent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the invoice is a draft, or a
    /// `ready_to_send` rule violation if it has no lines or a zero quantity.
    pub fn mark_sent(&self, id: &str) -> Result<Invoice, ApiError> {
        self.apply(id, InvoiceCommand::MarkSent)
    }

    /// Moves a sent invoice to paid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the invoice is sent.
    pub fn mark_paid(&self, id: &str) -> Result<Invoice, ApiError> {
        self.apply(id, InvoiceCommand::MarkPaid)
    }

    /// Cancels a draft or sent invoice.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the invoice is paid or cancelled.
    pub fn cancel(&self, id: &str) -> Result<Invoice, ApiError> {
        self.apply(id, InvoiceCommand::Cancel)
    }

    /// Deletes a draft invoice. Its number is not reused.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id or a `delete_only_drafts` rule
    /// violation for an issued invoice.
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let now = self.workspace.clock().now();
        let event = self.workspace.documents().update(
            &INVOICES_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |invoices: &mut Vec<Invoice>| {
                let index = invoices
                    .iter()
                    .position(|invoice| invoice.id == id)
                    .ok_or_else(|| ApiError::not_found("Invoice", id))?;
                let event = authorize_invoice_delete(&invoices[index], now)?;
                invoices.remove(index);
                Ok::<_, ApiError>(event)
            },
        )?;

        debug!(invoice_id = id, "invoice deleted");
        self.workspace.publish(&event);
        Ok(())
    }

    /// Looks up an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn get(&self, id: &str) -> Result<Option<Invoice>, ApiError> {
        Ok(self.load()?.into_iter().find(|invoice| invoice.id == id))
    }

    /// All invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn all(&self) -> Result<Vec<Invoice>, ApiError> {
        self.filtered(|_| true)
    }

    /// Invoices linked to `client_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn by_client(&self, client_id: &str) -> Result<Vec<Invoice>, ApiError> {
        self.filtered(|invoice| invoice.client_id.as_deref() == Some(client_id))
    }

    /// Invoices linked to `project_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn by_project(&self, project_id: &str) -> Result<Vec<Invoice>, ApiError> {
        self.filtered(|invoice| invoice.project_id.as_deref() == Some(project_id))
    }

    /// Invoices in `status`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>, ApiError> {
        self.filtered(|invoice| invoice.status == status)
    }

    /// Sent invoices past their effective due date on `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn overdue(&self, today: Date) -> Result<Vec<Invoice>, ApiError> {
        self.filtered(|invoice| invoice.is_overdue(today))
    }

    fn apply(&self, id: &str, command: InvoiceCommand) -> Result<Invoice, ApiError> {
        let profile = self.workspace.load_profile()?;
        let clients = self.workspace.load_clients()?;
        let snapshots = SnapshotBuilder::new(&profile, &clients);
        let now = self.workspace.clock().now();

        let InvoiceTransition { invoice, event } = self.workspace.documents().update(
            &INVOICES_DOCUMENT,
            RecoveryPolicy::Quarantine,
            |invoices: &mut Vec<Invoice>| {
                let slot = invoices
                    .iter_mut()
                    .find(|invoice| invoice.id == id)
                    .ok_or_else(|| ApiError::not_found("Invoice", id))?;
                let transition = apply_invoice(slot, command.clone(), &snapshots, now)?;
                *slot = transition.invoice.clone();
                Ok::<_, ApiError>(transition)
            },
        )?;

        debug!(invoice_id = %invoice.id, action = event.action.name(), "invoice changed");
        self.workspace.publish(&event);
        Ok(invoice)
    }

    fn load(&self) -> Result<Vec<Invoice>, ApiError> {
        Ok(self.workspace.documents().load(&INVOICES_DOCUMENT)?)
    }

    fn filtered<P>(&self, predicate: P) -> Result<Vec<Invoice>, ApiError>
    where
        P: Fn(&Invoice) -> bool,
    {
        let mut invoices: Vec<Invoice> = self
            .load()?
            .into_iter()
            .rev()
            .filter(|invoice| predicate(invoice))
            .collect();
        // Stable sort: equal timestamps keep the later insertion first.
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invoices)
    }
}
