// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::invoice::{Invoice, LineItemInput};
use crate::numbering::SEQUENCE_TOKENS;

/// Validates that a client name is usable.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace.
pub fn validate_client_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput {
            field: "name",
            reason: String::from("Client name cannot be empty"),
        });
    }
    Ok(())
}

/// Validates a document number template.
///
/// A template must embed the sequence, otherwise two documents issued on
/// the same day would share a number.
///
/// # Errors
///
/// Returns an error if the template is blank or has no sequence token.
pub fn validate_number_template(template: &str) -> Result<(), DomainError> {
    if template.trim().is_empty() {
        return Err(DomainError::InvalidInput {
            field: "number_format",
            reason: String::from("Number format cannot be empty"),
        });
    }

    if !SEQUENCE_TOKENS.iter().any(|token| template.contains(token)) {
        return Err(DomainError::InvalidInput {
            field: "number_format",
            reason: format!(
                "Number format '{template}' must contain {} or {}",
                SEQUENCE_TOKENS[0], SEQUENCE_TOKENS[1]
            ),
        });
    }

    Ok(())
}

/// Validates caller-supplied line items before they are priced.
///
/// Quantities of zero are accepted on drafts; they only block sending.
///
/// # Errors
///
/// Returns an error if any line has a blank item name.
pub fn validate_line_items(items: &[LineItemInput]) -> Result<(), DomainError> {
    for (index, item) in items.iter().enumerate() {
        if item.item_name.trim().is_empty() {
            return Err(DomainError::InvalidInput {
                field: "line_items",
                reason: format!("Line {} has no item name", index + 1),
            });
        }
    }
    Ok(())
}

/// Validates that an invoice's content allows it to be sent.
///
/// # Errors
///
/// Returns `DomainError::NotReadyToSend` if the invoice has no lines or
/// any line has a zero quantity.
pub fn validate_ready_to_send(invoice: &Invoice) -> Result<(), DomainError> {
    if invoice.line_items.is_empty() {
        return Err(DomainError::NotReadyToSend {
            id: invoice.id.clone(),
            reason: String::from("invoice has no line items"),
        });
    }

    if let Some(item) = invoice.line_items.iter().find(|item| item.quantity == 0) {
        return Err(DomainError::NotReadyToSend {
            id: invoice.id.clone(),
            reason: format!("line '{}' has zero quantity", item.item_name),
        });
    }

    Ok(())
}
