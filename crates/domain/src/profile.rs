// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::DocumentKind;
use serde::{Deserialize, Serialize};

/// Template used for invoice numbers until the profile overrides it.
pub const DEFAULT_INVOICE_NUMBER_FORMAT: &str = "INV-{YY}{MM}{DD}-{####}";

/// Template used for contract numbers until the profile overrides it.
pub const DEFAULT_CONTRACT_NUMBER_FORMAT: &str = "CTR-{YY}{MM}{DD}-{####}";

/// A bank account the studio accepts payment into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub label: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    pub is_default: bool,
}

/// Input for registering a payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPaymentMethod {
    pub label: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    /// Make this the default method. The first method on a profile is
    /// always the default regardless.
    pub is_default: bool,
}

impl PaymentMethod {
    /// Creates a payment method with the given identifier.
    #[must_use]
    pub fn new(id: String, input: NewPaymentMethod) -> Self {
        Self {
            id,
            label: input.label,
            bank_name: input.bank_name,
            account_number: input.account_number,
            account_holder: input.account_holder,
            is_default: input.is_default,
        }
    }
}

/// Partial update of a payment method's descriptive fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentMethodUpdate {
    pub label: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
}

/// The studio's own identity, numbering configuration and defaults.
///
/// There is exactly one profile per workspace. The sequence counters only
/// ever move forward, and only through [`BusinessProfile::issue_sequence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
    pub payment_methods: Vec<PaymentMethod>,
    pub invoice_number_format: String,
    pub contract_number_format: String,
    next_invoice_seq: u64,
    next_contract_seq: u64,
    pub default_invoice_terms: String,
    pub default_contract_terms: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            tax_id: String::new(),
            payment_methods: Vec::new(),
            invoice_number_format: DEFAULT_INVOICE_NUMBER_FORMAT.to_string(),
            contract_number_format: DEFAULT_CONTRACT_NUMBER_FORMAT.to_string(),
            next_invoice_seq: 1,
            next_contract_seq: 1,
            default_invoice_terms: String::new(),
            default_contract_terms: String::new(),
        }
    }
}

/// Partial update of the profile's editable fields.
///
/// Counters are deliberately absent: they are not user-editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tax_id: Option<String>,
    pub invoice_number_format: Option<String>,
    pub contract_number_format: Option<String>,
    pub default_invoice_terms: Option<String>,
    pub default_contract_terms: Option<String>,
}

impl BusinessProfile {
    /// Returns the sequence value the next document of `kind` will receive.
    #[must_use]
    pub const fn next_sequence(&self, kind: DocumentKind) -> u64 {
        match kind {
            DocumentKind::Invoice => self.next_invoice_seq,
            DocumentKind::Contract => self.next_contract_seq,
        }
    }

    /// Returns the number template for `kind`.
    #[must_use]
    pub fn number_format(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Invoice => &self.invoice_number_format,
            DocumentKind::Contract => &self.contract_number_format,
        }
    }

    /// Returns the default terms text for `kind`.
    #[must_use]
    pub fn default_terms(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Invoice => &self.default_invoice_terms,
            DocumentKind::Contract => &self.default_contract_terms,
        }
    }

    /// Consumes the current sequence value for `kind` and advances the counter.
    ///
    /// Returns the value before the increment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SequenceExhausted` if the counter cannot advance.
    pub fn issue_sequence(&mut self, kind: DocumentKind) -> Result<u64, DomainError> {
        let counter = match kind {
            DocumentKind::Invoice => &mut self.next_invoice_seq,
            DocumentKind::Contract => &mut self.next_contract_seq,
        };
        let issued = *counter;
        *counter = issued
            .checked_add(1)
            .ok_or(DomainError::SequenceExhausted(kind))?;
        Ok(issued)
    }

    /// Applies a partial update. Number templates are not validated here.
    pub fn apply_update(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            name,
            address,
            email,
            phone,
            tax_id,
            invoice_number_format,
            contract_number_format,
            default_invoice_terms,
            default_contract_terms,
        } = update;

        replace_if_some(&mut self.name, name);
        replace_if_some(&mut self.address, address);
        replace_if_some(&mut self.email, email);
        replace_if_some(&mut self.phone, phone);
        replace_if_some(&mut self.tax_id, tax_id);
        replace_if_some(&mut self.invoice_number_format, invoice_number_format);
        replace_if_some(&mut self.contract_number_format, contract_number_format);
        replace_if_some(&mut self.default_invoice_terms, default_invoice_terms);
        replace_if_some(&mut self.default_contract_terms, default_contract_terms);
    }

    /// Returns the payment method flagged as default, if any.
    #[must_use]
    pub fn default_payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.is_default)
    }

    /// Looks up a payment method by id.
    #[must_use]
    pub fn payment_method(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.id == id)
    }

    /// Adds a payment method, keeping at most one default.
    pub fn add_payment_method(&mut self, mut method: PaymentMethod) {
        if self.payment_methods.is_empty() {
            method.is_default = true;
        } else if method.is_default {
            self.clear_default();
        }
        self.payment_methods.push(method);
    }

    /// Updates the descriptive fields of a payment method.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PaymentMethodNotFound` if `id` is unknown.
    pub fn update_payment_method(
        &mut self,
        id: &str,
        update: PaymentMethodUpdate,
    ) -> Result<&PaymentMethod, DomainError> {
        let method = self
            .payment_methods
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::PaymentMethodNotFound(id.to_string()))?;

        replace_if_some(&mut method.label, update.label);
        replace_if_some(&mut method.bank_name, update.bank_name);
        replace_if_some(&mut method.account_number, update.account_number);
        replace_if_some(&mut method.account_holder, update.account_holder);
        Ok(method)
    }

    /// Removes a payment method.
    ///
    /// If the removed method was the default, the first remaining method
    /// becomes the default.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PaymentMethodNotFound` if `id` is unknown.
    pub fn remove_payment_method(&mut self, id: &str) -> Result<PaymentMethod, DomainError> {
        let index = self
            .payment_methods
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DomainError::PaymentMethodNotFound(id.to_string()))?;

        let removed = self.payment_methods.remove(index);
        if removed.is_default {
            if let Some(first) = self.payment_methods.first_mut() {
                first.is_default = true;
            }
        }
        Ok(removed)
    }

    /// Marks a payment method as the single default.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PaymentMethodNotFound` if `id` is unknown.
    pub fn set_default_payment_method(&mut self, id: &str) -> Result<(), DomainError> {
        if self.payment_method(id).is_none() {
            return Err(DomainError::PaymentMethodNotFound(id.to_string()));
        }
        for method in &mut self.payment_methods {
            method.is_default = method.id == id;
        }
        Ok(())
    }

    fn clear_default(&mut self) {
        for method in &mut self.payment_methods {
            method.is_default = false;
        }
    }
}

fn replace_if_some(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}
