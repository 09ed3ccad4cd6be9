// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier_domain::{LineItemInput, ScopeItemInput};
use time::Date;

/// Input for creating an invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewInvoice {
    /// The client this invoice bills, if any.
    pub client_id: Option<String>,
    /// The project this invoice belongs to, if any.
    pub project_id: Option<String>,
    /// Billed lines in display order.
    pub line_items: Vec<LineItemInput>,
    /// Signed correction applied after the subtotal.
    pub adjustments: i64,
    /// Explicit due date. Defaults to creation plus the payment term.
    pub due_date: Option<Date>,
    pub notes: String,
    /// Payment method to print. Defaults to the profile default.
    pub payment_method_id: Option<String>,
}

/// Input for creating a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContract {
    /// The client this contract is with, if any.
    pub client_id: Option<String>,
    /// The project this contract covers, if any.
    pub project_id: Option<String>,
    /// Deliverables in display order.
    pub scope: Vec<ScopeItemInput>,
    /// Contract terms. Defaults to the profile's default contract terms.
    pub terms: Option<String>,
    pub notes: String,
}

/// Partial update of a draft invoice's content.
///
/// Nested options distinguish "leave as is" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoicePatch {
    pub client_id: Option<Option<String>>,
    pub project_id: Option<Option<String>>,
    pub line_items: Option<Vec<LineItemInput>>,
    pub adjustments: Option<i64>,
    pub due_date: Option<Option<Date>>,
    pub notes: Option<String>,
}

/// Partial update of a draft contract's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractPatch {
    pub client_id: Option<Option<String>>,
    pub project_id: Option<Option<String>>,
    pub scope: Option<Vec<ScopeItemInput>>,
    pub terms: Option<String>,
    pub notes: Option<String>,
}

/// A requested change to an existing invoice.
///
/// Commands are data only; [`crate::apply_invoice`] decides whether they
/// are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceCommand {
    /// Edit content fields. Draft only.
    Update(InvoicePatch),
    /// Draft to sent.
    MarkSent,
    /// Sent to paid.
    MarkPaid,
    /// Draft or sent to cancelled.
    Cancel,
}

/// A requested change to an existing contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCommand {
    /// Edit content fields. Draft only.
    Update(ContractPatch),
    /// Draft to sent.
    MarkSent,
    /// Sent to signed.
    MarkSigned,
    /// Sent back to draft. Number and snapshot are kept.
    RevertToDraft,
    /// Draft or sent to cancelled.
    Cancel,
}
