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

mod client;
mod contract;
mod error;
mod invoice;
mod numbering;
mod profile;
mod snapshot;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use client::{Client, ClientDetails, ClientUpdate};
pub use contract::{Contract, ScopeItem, ScopeItemInput};
pub use error::DomainError;
pub use invoice::{
    DEFAULT_PAYMENT_TERM_DAYS, Invoice, InvoiceLineItem, InvoiceTotals, LineItemInput,
    compute_totals,
};
pub use numbering::{SEQUENCE_TOKENS, format_number};
pub use profile::{
    BusinessProfile, DEFAULT_CONTRACT_NUMBER_FORMAT, DEFAULT_INVOICE_NUMBER_FORMAT,
    NewPaymentMethod, PaymentMethod, PaymentMethodUpdate, ProfileUpdate,
};
pub use snapshot::{
    BusinessIdentity, ClientIdentity, ContractSnapshot, InvoiceSnapshot, build_contract_snapshot,
    build_invoice_snapshot,
};
pub use status::{ContractStatus, InvoiceStatus};
pub use types::{DocumentKind, iso_date};
pub use validation::{
    validate_client_name, validate_line_items, validate_number_template, validate_ready_to_send,
};
