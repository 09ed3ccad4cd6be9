// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Pure document lifecycle transitions.
//!
//! Nothing in this crate touches storage. Every function takes the current
//! record by reference and returns a new record plus the event describing
//! the change; callers persist the result.

mod apply;
mod clock;
mod command;
mod error;
mod snapshot;
mod state;

#[cfg(test)]
mod tests;

use uuid::Uuid;

pub use apply::{
    apply_contract, apply_invoice, authorize_contract_delete, authorize_invoice_delete,
    prepare_contract, prepare_invoice,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{
    ContractCommand, ContractPatch, InvoiceCommand, InvoicePatch, NewContract, NewInvoice,
};
pub use error::CoreError;
pub use snapshot::SnapshotBuilder;
pub use state::{ContractDraft, ContractTransition, InvoiceDraft, InvoiceTransition};

/// Generates a new random entity identifier.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
