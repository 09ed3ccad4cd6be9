// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Change notifications for the document store.
//!
//! Every committed mutation produces exactly one [`ChangeEvent`]. Events
//! are delivered after the write is durable, so an observer that reloads
//! the entity always sees the new state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use time::OffsetDateTime;

/// The kind of entity a change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// An invoice.
    Invoice,
    /// A contract.
    Contract,
    /// A client record.
    Client,
    /// The business profile, including its sequence counters.
    Profile,
}

impl EntityKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Contract => "contract",
            Self::Client => "client",
            Self::Profile => "profile",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened to the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeAction {
    /// The entity was created.
    Created,
    /// Content fields changed.
    Updated,
    /// The lifecycle status moved along a legal edge.
    StatusChanged {
        /// The status before the change.
        from: String,
        /// The status after the change.
        to: String,
    },
    /// The entity was removed.
    Deleted,
}

impl ChangeAction {
    /// Returns a short name for the action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged { .. } => "status_changed",
            Self::Deleted => "deleted",
        }
    }
}

/// An immutable record of one committed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The kind of entity that changed.
    pub entity: EntityKind,
    /// The identifier of the entity that changed.
    pub entity_id: String,
    /// What happened.
    pub action: ChangeAction,
    /// When the change was committed.
    pub occurred_at: OffsetDateTime,
}

impl ChangeEvent {
    /// Creates a new `ChangeEvent`.
    ///
    /// # Arguments
    ///
    /// * `entity` - The kind of entity that changed
    /// * `entity_id` - Its identifier
    /// * `action` - What happened
    /// * `occurred_at` - The commit time
    #[must_use]
    pub const fn new(
        entity: EntityKind,
        entity_id: String,
        action: ChangeAction,
        occurred_at: OffsetDateTime,
    ) -> Self {
        Self {
            entity,
            entity_id,
            action,
            occurred_at,
        }
    }
}

/// Receives change events.
///
/// Observers run on the thread that committed the change and must not
/// block for long.
pub trait ChangeObserver: Send + Sync {
    /// Called once per committed change.
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> ChangeObserver for F
where
    F: Fn(&ChangeEvent) + Send + Sync,
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event);
    }
}

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A set of observers notified in subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: AtomicU64,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn ChangeObserver>)>>,
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}

impl ObserverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer.
    pub fn subscribe(&self, observer: Arc<dyn ChangeObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    /// Removes an observer. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers an event to every registered observer.
    ///
    /// The lock is released before delivery, so observers may subscribe
    /// or unsubscribe from inside the callback.
    pub fn notify(&self, event: &ChangeEvent) {
        let observers: Vec<Arc<dyn ChangeObserver>> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer.on_change(event);
        }
    }
}

/// An observer that keeps every event it receives.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<ChangeEvent>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ChangeObserver for EventLog {
    fn on_change(&self, event: &ChangeEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
