// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ContractDraft, InvoiceDraft, NewContract, NewInvoice, SnapshotBuilder, prepare_contract,
    prepare_invoice,
};
use atelier_domain::{
    BusinessProfile, Client, ClientDetails, Contract, Invoice, LineItemInput, NewPaymentMethod,
    PaymentMethod, ProfileUpdate, ScopeItemInput,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-01-02 09:00 UTC)
}

pub fn create_test_later() -> OffsetDateTime {
    datetime!(2026-01-05 15:30 UTC)
}

pub fn create_test_profile() -> BusinessProfile {
    let mut profile: BusinessProfile = BusinessProfile::default();
    profile.apply_update(ProfileUpdate {
        name: Some(String::from("Grey Crane Studio")),
        email: Some(String::from("hello@greycrane.example")),
        default_contract_terms: Some(String::from("Net 14. Two rounds of revisions.")),
        ..ProfileUpdate::default()
    });
    for (id, label) in [("pm-1", "Main account"), ("pm-2", "Savings")] {
        profile.add_payment_method(PaymentMethod::new(
            id.to_string(),
            NewPaymentMethod {
                label: label.to_string(),
                bank_name: String::from("First Harbour Bank"),
                ..NewPaymentMethod::default()
            },
        ));
    }
    profile
}

pub fn create_test_clients() -> Vec<Client> {
    [("c1", "Ada Lovelace"), ("c2", "Grace Hopper")]
        .into_iter()
        .map(|(id, name)| {
            Client::new(
                id.to_string(),
                ClientDetails {
                    name: name.to_string(),
                    email: format!("{id}@clients.example"),
                    ..ClientDetails::default()
                },
                create_test_now(),
            )
            .unwrap()
        })
        .collect()
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

pub fn create_test_invoice_request() -> NewInvoice {
    NewInvoice {
        client_id: Some(String::from("c1")),
        project_id: Some(String::from("p1")),
        line_items: vec![design_line(2, 500_000)],
        ..NewInvoice::default()
    }
}

pub fn prepare_test_invoice(
    profile: &BusinessProfile,
    clients: &[Client],
    request: NewInvoice,
) -> InvoiceDraft {
    prepare_invoice(
        request,
        &SnapshotBuilder::new(profile, clients),
        create_test_now(),
    )
    .unwrap()
}

pub fn create_test_invoice() -> Invoice {
    let profile = create_test_profile();
    let clients = create_test_clients();
    prepare_test_invoice(&profile, &clients, create_test_invoice_request())
        .issue(String::from("INV-260102-0001"))
        .invoice
}

pub fn create_test_contract() -> Contract {
    let profile = create_test_profile();
    let clients = create_test_clients();
    let draft: ContractDraft = prepare_contract(
        NewContract {
            client_id: Some(String::from("c1")),
            scope: vec![ScopeItemInput {
                id: None,
                description: String::from("Logo concepts"),
            }],
            ..NewContract::default()
        },
        &SnapshotBuilder::new(&profile, &clients),
        create_test_now(),
    );
    draft.issue(String::from("CTR-260102-0001")).contract
}
