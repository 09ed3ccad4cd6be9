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
#![allow(clippy::multiple_crate_versions)]

//! Service boundary for Atelier.
//!
//! A [`Workspace`] ties the pure lifecycle rules to a document store. The
//! managers it hands out load the relevant collection, apply one
//! transition, commit with compare-and-swap and notify observers. Errors
//! from every layer are translated into [`ApiError`].

mod clients;
mod contracts;
mod documents;
mod error;
mod invoices;
mod profile;
mod sequence;
mod workspace;

#[cfg(test)]
mod tests;

pub use clients::ClientDirectory;
pub use contracts::ContractManager;
pub use documents::{CLIENTS_DOCUMENT, CONTRACTS_DOCUMENT, INVOICES_DOCUMENT, PROFILE_DOCUMENT};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use invoices::InvoiceManager;
pub use profile::ProfileService;
pub use sequence::{IssuedNumber, SequenceCounter};
pub use workspace::Workspace;

pub use atelier::{
    Clock, ContractPatch, FixedClock, InvoicePatch, NewContract, NewInvoice, SystemClock,
};
pub use atelier_events::{ChangeAction, ChangeEvent, ChangeObserver, EventLog, SubscriptionId};
pub use atelier_persistence::StorageWarning;
