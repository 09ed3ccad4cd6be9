// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage keys for the four collections.

use atelier_domain::{BusinessProfile, Client, Contract, Invoice};
use atelier_persistence::DocumentSpec;

/// The business profile, including both sequence counters. It has always
/// been stored in an envelope, so anything else is unreadable.
pub const PROFILE_DOCUMENT: DocumentSpec<BusinessProfile> =
    DocumentSpec::new("atelier.profile", "profile").envelope_only();

pub const CLIENTS_DOCUMENT: DocumentSpec<Vec<Client>> =
    DocumentSpec::new("atelier.clients", "clients");

pub const INVOICES_DOCUMENT: DocumentSpec<Vec<Invoice>> =
    DocumentSpec::new("atelier.invoices", "invoices");

pub const CONTRACTS_DOCUMENT: DocumentSpec<Vec<Contract>> =
    DocumentSpec::new("atelier.contracts", "contracts");
