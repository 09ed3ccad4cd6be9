// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BusinessProfile, Client, ClientDetails, Invoice, InvoiceLineItem, InvoiceSnapshot,
    InvoiceStatus, LineItemInput, NewPaymentMethod, PaymentMethod, ProfileUpdate,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn created_at() -> OffsetDateTime {
    datetime!(2026-01-02 09:30 UTC)
}

pub fn create_test_profile() -> BusinessProfile {
    let mut profile: BusinessProfile = BusinessProfile::default();
    profile.apply_update(ProfileUpdate {
        name: Some(String::from("Grey Crane Studio")),
        address: Some(String::from("12 Quay Street")),
        email: Some(String::from("hello@greycrane.example")),
        phone: Some(String::from("+44 20 7946 0000")),
        tax_id: Some(String::from("GB123456789")),
        ..ProfileUpdate::default()
    });
    profile
}

pub fn create_test_payment_method(id: &str, is_default: bool) -> PaymentMethod {
    PaymentMethod::new(
        id.to_string(),
        NewPaymentMethod {
            label: format!("Account {id}"),
            bank_name: String::from("First Harbour Bank"),
            account_number: String::from("00112233"),
            account_holder: String::from("Grey Crane Studio Ltd"),
            is_default,
        },
    )
}

pub fn create_test_client() -> Client {
    Client::new(
        String::from("client-1"),
        ClientDetails {
            name: String::from("Ada Lovelace"),
            company: String::from("Analytical Engines"),
            email: String::from("ada@engines.example"),
            ..ClientDetails::default()
        },
        created_at(),
    )
    .unwrap()
}

pub fn create_test_line_item(id: &str, quantity: u32, unit_price: i64) -> InvoiceLineItem {
    InvoiceLineItem::new(
        id.to_string(),
        LineItemInput {
            id: None,
            item_name: format!("Item {id}"),
            description: String::new(),
            quantity,
            unit_price,
        },
    )
    .unwrap()
}

pub fn create_test_invoice(status: InvoiceStatus) -> Invoice {
    let mut invoice: Invoice = Invoice {
        id: String::from("inv-1"),
        number: String::from("INV-260102-0001"),
        client_id: Some(String::from("client-1")),
        project_id: None,
        status,
        line_items: vec![create_test_line_item("line-1", 2, 5_000)],
        subtotal: 0,
        adjustments: 0,
        total: 0,
        due_date: None,
        notes: String::new(),
        snapshot: InvoiceSnapshot::default(),
        created_at: created_at(),
        updated_at: created_at(),
    };
    invoice.recompute_totals().unwrap();
    invoice
}
