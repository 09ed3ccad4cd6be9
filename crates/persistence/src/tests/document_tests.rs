// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::NOTES;
use crate::{DocumentSpec, SCHEMA_VERSION, UnreadableReason, decode, encode};
use serde_json::{Value, json};

#[test]
fn test_encode_wraps_payload_in_envelope() {
    let encoded = encode(&NOTES, &vec![String::from("a")]).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value, json!({"schemaVersion": SCHEMA_VERSION, "notes": ["a"]}));
}

#[test]
fn test_decode_current_envelope() {
    let decoded = decode(&NOTES, r#"{"schemaVersion":1,"notes":["a","b"]}"#).unwrap();
    assert_eq!(decoded.version, 1);
    assert_eq!(decoded.payload, vec!["a", "b"]);
}

#[test]
fn test_bare_array_reads_as_version_zero() {
    let decoded = decode(&NOTES, r#"["legacy"]"#).unwrap();
    assert_eq!(decoded.version, 0);
    assert_eq!(decoded.payload, vec!["legacy"]);
}

#[test]
fn test_newer_schema_version_is_rejected() {
    let result = decode(&NOTES, r#"{"schemaVersion":7,"notes":[]}"#);
    assert_eq!(
        result.unwrap_err(),
        UnreadableReason::FutureVersion {
            found: 7,
            supported: SCHEMA_VERSION,
        }
    );
}

#[test]
fn test_corrupt_documents_are_rejected() {
    for raw in [
        "{not json",
        r#"{"schemaVersion":1}"#,
        r#"{"schemaVersion":"one","notes":[]}"#,
        r#"{"schemaVersion":1,"notes":{"a":1}}"#,
        r#"{"unrelated":true}"#,
        "42",
    ] {
        assert!(
            matches!(decode(&NOTES, raw), Err(UnreadableReason::Corrupt(_))),
            "{raw} should be corrupt"
        );
    }
}

#[derive(Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
struct Settings {
    counter: u64,
}

const SETTINGS: DocumentSpec<Settings> =
    DocumentSpec::new("test.settings", "settings").envelope_only();

#[test]
fn test_unversioned_object_is_corrupt_even_when_payload_has_defaults() {
    for raw in [r#"{"settings":{"counter":40}}"#, r#"{"counter":40}"#, "{}"] {
        assert!(
            matches!(decode(&SETTINGS, raw), Err(UnreadableReason::Corrupt(_))),
            "{raw} should be corrupt"
        );
    }
}

#[test]
fn test_envelope_only_document_rejects_bare_array() {
    assert!(matches!(
        decode(&SETTINGS, "[]"),
        Err(UnreadableReason::Corrupt(_))
    ));
    let decoded = decode(&SETTINGS, r#"{"schemaVersion":1,"settings":{"counter":40}}"#).unwrap();
    assert_eq!(decoded.payload, Settings { counter: 40 });
}

#[test]
fn test_unreadable_reason_display() {
    let reason = UnreadableReason::FutureVersion {
        found: 3,
        supported: 1,
    };
    assert_eq!(
        reason.to_string(),
        "schema version 3 is newer than supported version 1"
    );
}
