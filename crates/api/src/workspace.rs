// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clients::ClientDirectory;
use crate::contracts::ContractManager;
use crate::documents::{CLIENTS_DOCUMENT, PROFILE_DOCUMENT};
use crate::error::ApiError;
use crate::invoices::InvoiceManager;
use crate::profile::ProfileService;
use crate::sequence::SequenceCounter;
use atelier::{Clock, SystemClock};
use atelier_domain::{BusinessProfile, Client};
use atelier_events::{ChangeEvent, ChangeObserver, ObserverRegistry, SubscriptionId};
use atelier_persistence::{DocumentStore, KeyValueStore, MemoryStore, SqliteStore, StorageWarning};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Owns everything a session needs: the document store, the clock and the
/// change observers.
///
/// A `Workspace` is `Send + Sync`; share it behind an `Arc` to issue
/// documents from several threads. Separate workspaces over the same
/// backing store also coordinate through compare-and-swap.
pub struct Workspace {
    documents: DocumentStore,
    clock: Arc<dyn Clock>,
    observers: ObserverRegistry,
}

impl Workspace {
    /// Creates a workspace over an existing key-value store.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_documents(DocumentStore::new(kv), clock)
    }

    /// Creates a workspace over a configured document store.
    #[must_use]
    pub fn with_documents(documents: DocumentStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            documents,
            clock,
            observers: ObserverRegistry::new(),
        }
    }

    /// Creates an ephemeral workspace on the system clock.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock))
    }

    /// Opens (creating if needed) a `SQLite` file-backed workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> Result<Self, ApiError> {
        let store = SqliteStore::open(path)?;
        info!(location = store.location(), "workspace opened");
        Ok(Self::new(Arc::new(store), clock))
    }

    #[must_use]
    pub const fn invoices(&self) -> InvoiceManager<'_> {
        InvoiceManager::new(self)
    }

    #[must_use]
    pub const fn contracts(&self) -> ContractManager<'_> {
        ContractManager::new(self)
    }

    #[must_use]
    pub const fn clients(&self) -> ClientDirectory<'_> {
        ClientDirectory::new(self)
    }

    #[must_use]
    pub const fn profile(&self) -> ProfileService<'_> {
        ProfileService::new(self)
    }

    #[must_use]
    pub const fn sequences(&self) -> SequenceCounter<'_> {
        SequenceCounter::new(self)
    }

    /// Registers an observer for committed changes.
    pub fn subscribe(&self, observer: Arc<dyn ChangeObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Documents found unreadable during this session.
    #[must_use]
    pub fn storage_warnings(&self) -> Vec<StorageWarning> {
        self.documents.warnings()
    }

    /// The clock used for timestamps and numbering dates.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) const fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub(crate) fn publish(&self, event: &ChangeEvent) {
        self.observers.notify(event);
    }

    pub(crate) fn load_profile(&self) -> Result<BusinessProfile, ApiError> {
        Ok(self.documents.load(&PROFILE_DOCUMENT)?)
    }

    pub(crate) fn load_clients(&self) -> Result<Vec<Client>, ApiError> {
        Ok(self.documents.load(&CLIENTS_DOCUMENT)?)
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
