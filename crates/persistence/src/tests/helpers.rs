// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use crate::{
    DocumentSpec, DocumentStore, KeyValueStore, MemoryStore, PersistenceError, QUARANTINE_PREFIX,
};

pub const NOTES: DocumentSpec<Vec<String>> = DocumentSpec::new("test.notes", "notes");

/// A store whose compare-and-swap always loses outside the quarantine area.
#[derive(Debug, Default)]
pub struct AlwaysConflicting {
    pub inner: MemoryStore,
}

impl KeyValueStore for AlwaysConflicting {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.inner.set(key, value)
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, PersistenceError> {
        if key.starts_with(QUARANTINE_PREFIX) {
            return self.inner.compare_and_swap(key, expected, new);
        }
        Ok(false)
    }

    fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        self.inner.keys()
    }
}

pub fn create_memory_documents() -> (Arc<MemoryStore>, DocumentStore) {
    let kv = Arc::new(MemoryStore::new());
    let documents = DocumentStore::new(kv.clone());
    (kv, documents)
}

pub fn push_note(documents: &DocumentStore, note: &str) -> Result<usize, PersistenceError> {
    documents.update(&NOTES, crate::RecoveryPolicy::Quarantine, |notes| {
        notes.push(note.to_string());
        Ok(notes.len())
    })
}
