// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::snapshot::InvoiceSnapshot;
use crate::status::InvoiceStatus;
use crate::types::{DocumentKind, iso_date};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

/// Days after creation an invoice without an explicit due date falls due.
pub const DEFAULT_PAYMENT_TERM_DAYS: i64 = 30;

/// Caller-supplied line item content.
///
/// `id` is kept when present so edits preserve line identity; new lines
/// get a fresh id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemInput {
    pub id: Option<String>,
    pub item_name: String,
    pub description: String,
    pub quantity: u32,
    /// Price per unit in minor currency units.
    pub unit_price: i64,
}

/// A billed line. `total` is derived from quantity and unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    pub id: String,
    pub item_name: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub total: i64,
}

impl InvoiceLineItem {
    /// Creates a line item and computes its total.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if `quantity * unit_price`
    /// does not fit.
    pub fn new(id: String, input: LineItemInput) -> Result<Self, DomainError> {
        let total = i64::from(input.quantity)
            .checked_mul(input.unit_price)
            .ok_or_else(|| DomainError::AmountOverflow {
                operation: format!("pricing line item '{}'", input.item_name),
            })?;

        Ok(Self {
            id,
            item_name: input.item_name,
            description: input.description,
            quantity: input.quantity,
            unit_price: input.unit_price,
            total,
        })
    }
}

/// Derived invoice amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    /// Sum of line totals.
    pub subtotal: i64,
    /// `subtotal + adjustments`.
    pub total: i64,
}

/// Computes subtotal and total for a set of lines.
///
/// # Errors
///
/// Returns `DomainError::AmountOverflow` if any sum leaves the `i64` range.
pub fn compute_totals(
    line_items: &[InvoiceLineItem],
    adjustments: i64,
) -> Result<InvoiceTotals, DomainError> {
    let subtotal = line_items
        .iter()
        .try_fold(0_i64, |acc, item| acc.checked_add(item.total))
        .ok_or_else(|| DomainError::AmountOverflow {
            operation: String::from("summing line items"),
        })?;

    let total = subtotal
        .checked_add(adjustments)
        .ok_or_else(|| DomainError::AmountOverflow {
            operation: String::from("applying adjustments"),
        })?;

    Ok(InvoiceTotals { subtotal, total })
}

/// A numbered bill sent to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub client_id: Option<String>,
    pub project_id: Option<String>,
    pub status: InvoiceStatus,
    pub line_items: Vec<InvoiceLineItem>,
    pub subtotal: i64,
    /// Signed correction applied after the subtotal (discounts, fees).
    pub adjustments: i64,
    pub total: i64,
    #[serde(default, with = "iso_date::option")]
    pub due_date: Option<Date>,
    pub notes: String,
    pub snapshot: InvoiceSnapshot,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Invoice {
    /// Returns true while content fields may change.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    /// Fails with `FrozenEntity` unless the invoice is a draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::FrozenEntity` if the invoice left draft.
    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.is_editable() {
            return Ok(());
        }
        Err(DomainError::FrozenEntity {
            kind: DocumentKind::Invoice,
            id: self.id.clone(),
            status: self.status.as_str().to_string(),
        })
    }

    /// Recomputes `subtotal` and `total` from the current lines.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` on overflow; the invoice is
    /// unchanged in that case.
    pub fn recompute_totals(&mut self) -> Result<(), DomainError> {
        let totals = compute_totals(&self.line_items, self.adjustments)?;
        self.subtotal = totals.subtotal;
        self.total = totals.total;
        Ok(())
    }

    /// The explicit due date, or creation date plus the default term.
    #[must_use]
    pub fn effective_due_date(&self) -> Date {
        self.due_date.unwrap_or_else(|| {
            self.created_at
                .date()
                .saturating_add(Duration::days(DEFAULT_PAYMENT_TERM_DAYS))
        })
    }

    /// True when the invoice is awaiting payment past its due date.
    #[must_use]
    pub fn is_overdue(&self, today: Date) -> bool {
        self.status == InvoiceStatus::Sent && today > self.effective_due_date()
    }
}
