// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Behavior every `KeyValueStore` must share, run against each backend.

use crate::{KeyValueStore, MemoryStore, SqliteStore};

fn backends() -> Vec<(&'static str, Box<dyn KeyValueStore>)> {
    vec![
        ("memory", Box::new(MemoryStore::new())),
        ("sqlite", Box::new(SqliteStore::new_in_memory().unwrap())),
    ]
}

#[test]
fn test_get_missing_key_returns_none() {
    for (name, store) in backends() {
        assert_eq!(store.get("absent").unwrap(), None, "{name}");
    }
}

#[test]
fn test_set_then_get_and_overwrite() {
    for (name, store) in backends() {
        store.set("k", "one").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("one"), "{name}");
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"), "{name}");
    }
}

#[test]
fn test_compare_and_swap_on_absent_key() {
    for (name, store) in backends() {
        assert!(store.compare_and_swap("k", None, "first").unwrap(), "{name}");
        assert!(!store.compare_and_swap("k", None, "second").unwrap(), "{name}");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("first"), "{name}");
    }
}

#[test]
fn test_compare_and_swap_requires_matching_value() {
    for (name, store) in backends() {
        store.set("k", "v1").unwrap();

        assert!(!store.compare_and_swap("k", Some("stale"), "x").unwrap(), "{name}");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"), "{name}");

        assert!(store.compare_and_swap("k", Some("v1"), "v2").unwrap(), "{name}");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"), "{name}");
    }
}

#[test]
fn test_keys_are_sorted() {
    for (name, store) in backends() {
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        store.set("quarantine/a", "x").unwrap();
        assert_eq!(
            store.keys().unwrap(),
            vec!["a", "b", "quarantine/a"],
            "{name}"
        );
    }
}
