// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::documents::PROFILE_DOCUMENT;
use crate::error::ApiError;
use crate::workspace::Workspace;
use atelier::new_id;
use atelier_domain::{
    BusinessProfile, NewPaymentMethod, PaymentMethod, PaymentMethodUpdate, ProfileUpdate,
    validate_number_template,
};
use atelier_events::{ChangeAction, ChangeEvent, EntityKind};
use atelier_persistence::RecoveryPolicy;
use tracing::debug;

/// Reads and edits the business profile.
///
/// Reads fall back to defaults when the stored profile is unreadable.
/// Writes are refused in that state, since a reset profile would also
/// reset the sequence counters.
#[derive(Debug, Clone, Copy)]
pub struct ProfileService<'a> {
    workspace: &'a Workspace,
}

impl<'a> ProfileService<'a> {
    pub(crate) const fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Returns the current profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn get(&self) -> Result<BusinessProfile, ApiError> {
        self.workspace.load_profile()
    }

    /// Applies a partial update to the identity, templates and default terms.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a number template is blank or lacks a
    /// sequence token, or a storage error.
    pub fn update(&self, update: ProfileUpdate) -> Result<BusinessProfile, ApiError> {
        if let Some(template) = &update.invoice_number_format {
            validate_number_template(template)?;
        }
        if let Some(template) = &update.contract_number_format {
            validate_number_template(template)?;
        }

        self.mutate(|profile| {
            profile.apply_update(update.clone());
            Ok(profile.clone())
        })
    }

    /// Adds a payment method. The first method added becomes the default.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn add_payment_method(&self, input: NewPaymentMethod) -> Result<PaymentMethod, ApiError> {
        let id = new_id();
        self.mutate(|profile| {
            profile.add_payment_method(PaymentMethod::new(id.clone(), input.clone()));
            profile
                .payment_method(&id)
                .cloned()
                .ok_or_else(|| ApiError::Internal {
                    message: format!("payment method '{id}' vanished after insert"),
                })
        })
    }

    /// Edits the descriptive fields of a payment method.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is unknown, or a storage error.
    pub fn update_payment_method(
        &self,
        id: &str,
        update: PaymentMethodUpdate,
    ) -> Result<PaymentMethod, ApiError> {
        self.mutate(|profile| Ok(profile.update_payment_method(id, update.clone())?.clone()))
    }

    /// Removes a payment method, promoting another to default if needed.
    ///
    /// Snapshots on existing invoices keep their copy of the method.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is unknown, or a storage error.
    pub fn remove_payment_method(&self, id: &str) -> Result<PaymentMethod, ApiError> {
        self.mutate(|profile| Ok(profile.remove_payment_method(id)?))
    }

    /// Makes `id` the single default payment method.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is unknown, or a storage error.
    pub fn set_default_payment_method(&self, id: &str) -> Result<(), ApiError> {
        self.mutate(|profile| Ok(profile.set_default_payment_method(id)?))
    }

    fn mutate<R, F>(&self, mut apply: F) -> Result<R, ApiError>
    where
        F: FnMut(&mut BusinessProfile) -> Result<R, ApiError>,
    {
        let result = self.workspace.documents().update(
            &PROFILE_DOCUMENT,
            RecoveryPolicy::Refuse,
            |profile: &mut BusinessProfile| apply(profile),
        )?;

        debug!("business profile updated");
        self.workspace.publish(&ChangeEvent::new(
            EntityKind::Profile,
            String::from("profile"),
            ChangeAction::Updated,
            self.workspace.clock().now(),
        ));
        Ok(result)
    }
}
