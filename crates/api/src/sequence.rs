// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::documents::PROFILE_DOCUMENT;
use crate::error::ApiError;
use crate::workspace::Workspace;
use atelier_domain::{BusinessProfile, DocumentKind, format_number};
use atelier_events::{ChangeAction, ChangeEvent, EntityKind};
use atelier_persistence::RecoveryPolicy;
use serde::Serialize;
use tracing::debug;

/// A consumed sequence value and the number formatted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedNumber {
    pub sequence: u64,
    pub number: String,
}

/// Per-kind document counters stored on the business profile.
///
/// Values are handed out by compare-and-swap on the profile document, so
/// every caller sharing the backing store receives a distinct value. A
/// value is consumed even if the caller later fails to store its document.
#[derive(Debug, Clone, Copy)]
pub struct SequenceCounter<'a> {
    workspace: &'a Workspace,
}

impl<'a> SequenceCounter<'a> {
    pub(crate) const fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Consumes and returns the next sequence value for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile document is unreadable, the counter
    /// is exhausted, or the store stays contended.
    pub fn next_sequence(&self, kind: DocumentKind) -> Result<u64, ApiError> {
        Ok(self.consume(kind)?.0)
    }

    /// Returns the value `next_sequence` would hand out, without consuming it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn peek_next_sequence(&self, kind: DocumentKind) -> Result<u64, ApiError> {
        Ok(self.workspace.load_profile()?.next_sequence(kind))
    }

    /// Consumes a sequence value and formats it with today's date.
    ///
    /// # Errors
    ///
    /// See [`SequenceCounter::next_sequence`].
    pub fn issue(&self, kind: DocumentKind) -> Result<IssuedNumber, ApiError> {
        let (sequence, profile) = self.consume(kind)?;
        let number = format_number(
            profile.number_format(kind),
            sequence,
            self.workspace.clock().today(),
        );
        debug!(kind = %kind, sequence, number = %number, "issued document number");
        Ok(IssuedNumber { sequence, number })
    }

    /// Formats the number the next document of `kind` would receive.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn preview(&self, kind: DocumentKind) -> Result<String, ApiError> {
        let profile = self.workspace.load_profile()?;
        Ok(format_number(
            profile.number_format(kind),
            profile.next_sequence(kind),
            self.workspace.clock().today(),
        ))
    }

    /// Advances the counter and returns the consumed value together with
    /// the profile as committed, so the template matches the counter.
    fn consume(&self, kind: DocumentKind) -> Result<(u64, BusinessProfile), ApiError> {
        let consumed = self.workspace.documents().update(
            &PROFILE_DOCUMENT,
            RecoveryPolicy::Refuse,
            |profile: &mut BusinessProfile| {
                let sequence = profile.issue_sequence(kind)?;
                Ok::<_, ApiError>((sequence, profile.clone()))
            },
        )?;

        self.workspace.publish(&ChangeEvent::new(
            EntityKind::Profile,
            String::from("profile"),
            ChangeAction::Updated,
            self.workspace.clock().now(),
        ));
        Ok(consumed)
    }
}
