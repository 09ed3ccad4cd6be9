// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` initialization, isolation and cross-connection behavior.

use std::sync::Arc;
use std::thread;

use crate::{
    DocumentSpec, DocumentStore, KeyValueStore, PersistenceError, RecoveryPolicy, SqliteStore,
};

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let db1 = SqliteStore::new_in_memory().unwrap();
    let db2 = SqliteStore::new_in_memory().unwrap();

    db1.set("k", "v").unwrap();

    assert_eq!(db1.get("k").unwrap().as_deref(), Some("v"));
    assert_eq!(db2.get("k").unwrap(), None);
    assert_ne!(db1.location(), db2.location());
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atelier.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        store.set("atelier.profile", "{}").unwrap();
    }

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("atelier.profile").unwrap().as_deref(),
        Some("{}")
    );
}

#[test]
fn test_two_connections_see_each_others_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");

    let a = SqliteStore::open(&path).unwrap();
    let b = SqliteStore::open(&path).unwrap();

    a.set("k", "from-a").unwrap();
    assert!(!b.compare_and_swap("k", None, "from-b").unwrap());
    assert!(b.compare_and_swap("k", Some("from-a"), "from-b").unwrap());
    assert_eq!(a.get("k").unwrap().as_deref(), Some("from-b"));
}

#[test]
fn test_concurrent_counters_on_separate_connections_lose_no_increments() {
    const COUNTER: DocumentSpec<u64> = DocumentSpec::new("test.counter", "counter");
    const THREADS: u64 = 4;
    const PER_THREAD: u64 = 25;

    let dir = tempfile::tempdir().unwrap();
    let path = Arc::new(dir.path().join("counter.db"));
    // Create the schema once before the writers race.
    drop(SqliteStore::open(path.as_path()).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let path = Arc::clone(&path);
            thread::spawn(move || {
                let store = SqliteStore::open(path.as_path()).unwrap();
                let documents = DocumentStore::new(Arc::new(store));
                let mut seen = Vec::new();
                for _ in 0..PER_THREAD {
                    let value = documents
                        .update(&COUNTER, RecoveryPolicy::Refuse, |n: &mut u64| {
                            *n += 1;
                            Ok::<u64, PersistenceError>(*n)
                        })
                        .unwrap();
                    seen.push(value);
                }
                seen
            })
        })
        .collect();

    let mut all: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all.sort_unstable();

    let expected: Vec<u64> = (1..=THREADS * PER_THREAD).collect();
    assert_eq!(all, expected);
}
