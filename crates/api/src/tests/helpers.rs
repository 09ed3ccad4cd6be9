// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use atelier::FixedClock;
use atelier_domain::{Client, ClientDetails, LineItemInput, NewPaymentMethod, ProfileUpdate};
use atelier_persistence::MemoryStore;
use time::macros::datetime;

use crate::{NewInvoice, Workspace};

pub const INVOICE_FORMAT: &str = "GC-INV-{YY}{MM}{DD}-{####}";
pub const CONTRACT_FORMAT: &str = "GC-CTR-{YYYY}-{###}";

/// A clock pinned at 2026-01-02 09:00 UTC.
pub fn create_test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(datetime!(2026-01-02 09:00 UTC)))
}

/// An empty in-memory workspace and the clock driving it.
pub fn create_test_workspace() -> (Workspace, Arc<FixedClock>) {
    let clock = create_test_clock();
    let workspace = Workspace::new(Arc::new(MemoryStore::new()), clock.clone());
    (workspace, clock)
}

/// Sets the studio identity, both number formats and one payment method.
pub fn seed_profile(workspace: &Workspace) {
    workspace
        .profile()
        .update(ProfileUpdate {
            name: Some(String::from("Grey Crane Studio")),
            email: Some(String::from("hello@greycrane.example")),
            invoice_number_format: Some(INVOICE_FORMAT.to_string()),
            contract_number_format: Some(CONTRACT_FORMAT.to_string()),
            default_contract_terms: Some(String::from("Net 14. Two rounds of revisions.")),
            ..ProfileUpdate::default()
        })
        .expect("Failed to seed profile");

    workspace
        .profile()
        .add_payment_method(NewPaymentMethod {
            label: String::from("Main account"),
            bank_name: String::from("First Heron Bank"),
            account_number: String::from("12-3456-7890"),
            account_holder: String::from("Grey Crane Studio"),
            is_default: true,
        })
        .expect("Failed to add payment method");
}

/// A seeded workspace.
pub fn create_seeded_workspace() -> (Workspace, Arc<FixedClock>) {
    let (workspace, clock) = create_test_workspace();
    seed_profile(&workspace);
    (workspace, clock)
}

pub fn create_test_client(workspace: &Workspace, name: &str) -> Client {
    workspace
        .clients()
        .create(ClientDetails {
            name: name.to_string(),
            company: String::from("Analytical Engines"),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            ..ClientDetails::default()
        })
        .expect("Failed to create client")
}

pub fn design_line(quantity: u32, unit_price: i64) -> LineItemInput {
    LineItemInput {
        id: None,
        item_name: String::from("Design"),
        description: String::from("Brand identity"),
        quantity,
        unit_price,
    }
}

/// Design × 2 @ 500000 for `client_id` on project p1.
pub fn create_test_invoice_request(client_id: &str) -> NewInvoice {
    NewInvoice {
        client_id: Some(client_id.to_string()),
        project_id: Some(String::from("p1")),
        line_items: vec![design_line(2, 500_000)],
        ..NewInvoice::default()
    }
}
