// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier_domain::{ClientDetails, ClientUpdate, ProfileUpdate};

use crate::{ApiError, InvoicePatch, NewContract};

use super::helpers::{create_seeded_workspace, create_test_client, create_test_invoice_request};

#[test]
fn test_client_edit_does_not_touch_existing_snapshots() {
    let (workspace, _clock) = create_seeded_workspace();
    let client = create_test_client(&workspace, "Ada Lovelace");
    let invoice = workspace
        .invoices()
        .create(create_test_invoice_request(&client.id))
        .unwrap();

    workspace
        .clients()
        .update(
            &client.id,
            ClientUpdate {
                name: Some(String::from("Ada King")),
                ..ClientUpdate::default()
            },
        )
        .unwrap();
    workspace
        .profile()
        .update(ProfileUpdate {
            name: Some(String::from("Crane & Co")),
            ..ProfileUpdate::default()
        })
        .unwrap();

    let stored = workspace.invoices().get(&invoice.id).unwrap().unwrap();
    assert_eq!(stored.snapshot, invoice.snapshot);
    assert_eq!(stored.snapshot.client.name, "Ada Lovelace");
    assert_eq!(stored.snapshot.business.name, "Grey Crane Studio");
}

#[test]
fn test_changing_client_on_draft_rebuilds_snapshot() {
    let (workspace, _clock) = create_seeded_workspace();
    let ada = create_test_client(&workspace, "Ada Lovelace");
    let grace = create_test_client(&workspace, "Grace Hopper");
    let invoice = workspace
        .invoices()
        .create(create_test_invoice_request(&ada.id))
        .unwrap();

    let moved = workspace
        .invoices()
        .update(
            &invoice.id,
            InvoicePatch {
                client_id: Some(Some(grace.id.clone())),
                ..InvoicePatch::default()
            },
        )
        .unwrap();

    assert_eq!(moved.client_id.as_deref(), Some(grace.id.as_str()));
    assert_eq!(moved.snapshot.client.name, "Grace Hopper");
    assert_eq!(moved.snapshot.payment_method, invoice.snapshot.payment_method);
}

#[test]
fn test_other_draft_edits_keep_snapshot() {
    let (workspace, _clock) = create_seeded_workspace();
    let client = create_test_client(&workspace, "Ada Lovelace");
    let invoice = workspace
        .invoices()
        .create(create_test_invoice_request(&client.id))
        .unwrap();
    workspace
        .clients()
        .update(
            &client.id,
            ClientUpdate {
                company: Some(String::from("Difference Engines")),
                ..ClientUpdate::default()
            },
        )
        .unwrap();

    let edited = workspace
        .invoices()
        .update(
            &invoice.id,
            InvoicePatch {
                notes: Some(String::from("Second draft")),
                client_id: Some(Some(client.id.clone())),
                ..InvoicePatch::default()
            },
        )
        .unwrap();

    assert_eq!(edited.snapshot.client.company, "Analytical Engines");
}

#[test]
fn test_delete_client_unlinks_drafts() {
    let (workspace, _clock) = create_seeded_workspace();
    let client = create_test_client(&workspace, "Ada Lovelace");
    let invoice = workspace
        .invoices()
        .create(create_test_invoice_request(&client.id))
        .unwrap();
    let contract = workspace
        .contracts()
        .create(NewContract {
            client_id: Some(client.id.clone()),
            ..NewContract::default()
        })
        .unwrap();

    workspace.clients().delete(&client.id).unwrap();

    assert_eq!(workspace.clients().get(&client.id).unwrap(), None);
    let invoice = workspace.invoices().get(&invoice.id).unwrap().unwrap();
    let contract = workspace.contracts().get(&contract.id).unwrap().unwrap();
    assert_eq!(invoice.client_id, None);
    assert_eq!(contract.client_id, None);
    assert_eq!(invoice.snapshot.client.name, "Ada Lovelace");
    assert_eq!(contract.snapshot.client.name, "Ada Lovelace");
    assert!(workspace.invoices().by_client(&client.id).unwrap().is_empty());
}

#[test]
fn test_delete_client_leaves_issued_documents_untouched() {
    let (workspace, clock) = create_seeded_workspace();
    let client = create_test_client(&workspace, "Ada Lovelace");
    let invoice = workspace
        .invoices()
        .create(create_test_invoice_request(&client.id))
        .unwrap();
    let sent_invoice = workspace.invoices().mark_sent(&invoice.id).unwrap();
    let contract = workspace
        .contracts()
        .create(NewContract {
            client_id: Some(client.id.clone()),
            ..NewContract::default()
        })
        .unwrap();
    workspace.contracts().mark_sent(&contract.id).unwrap();
    let signed_contract = workspace.contracts().mark_signed(&contract.id).unwrap();

    clock.advance(time::Duration::hours(1));
    workspace.clients().delete(&client.id).unwrap();

    assert_eq!(
        workspace.invoices().get(&invoice.id).unwrap(),
        Some(sent_invoice)
    );
    assert_eq!(
        workspace.contracts().get(&contract.id).unwrap(),
        Some(signed_contract)
    );
}

#[test]
fn test_delete_unknown_client_is_not_found() {
    let (workspace, _clock) = create_seeded_workspace();

    assert!(matches!(
        workspace.clients().delete("missing"),
        Err(ApiError::NotFound { .. })
    ));
}

#[test]
fn test_client_list_is_sorted_by_name() {
    let (workspace, _clock) = create_seeded_workspace();
    create_test_client(&workspace, "grace Hopper");
    create_test_client(&workspace, "Ada Lovelace");
    create_test_client(&workspace, "Charles Babbage");

    let names: Vec<String> = workspace
        .clients()
        .list()
        .unwrap()
        .into_iter()
        .map(|client| client.name)
        .collect();

    assert_eq!(names, vec!["Ada Lovelace", "Charles Babbage", "grace Hopper"]);
}

#[test]
fn test_client_validation() {
    let (workspace, _clock) = create_seeded_workspace();

    assert!(matches!(
        workspace.clients().create(ClientDetails::default()),
        Err(ApiError::InvalidInput { .. })
    ));

    let client = create_test_client(&workspace, "Ada Lovelace");
    let result = workspace.clients().update(
        &client.id,
        ClientUpdate {
            name: Some(String::from(" ")),
            ..ClientUpdate::default()
        },
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert_eq!(
        workspace.clients().get(&client.id).unwrap().unwrap().name,
        "Ada Lovelace"
    );
}
