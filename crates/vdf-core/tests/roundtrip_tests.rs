use serde_json::json;
use vdf_core::{
    decode, decode_default, encode, encode_json, vdf_to_json, DecoderConfig, VdfObject, VdfValue,
};

/// Assert that encode → decode (no coercions) gives the input back, and that
/// re-encoding the decoded tree is byte-identical.
fn assert_roundtrip(value: &VdfValue) {
    let bytes = encode(value).expect("encode failed");
    let config = DecoderConfig::raw().convert_arrays(true);
    let decoded = decode(&bytes, &config).expect("decode failed");
    assert_eq!(&decoded, value, "Roundtrip failed:\n  bytes: {bytes:?}");

    let again = encode(&decoded).expect("re-encode failed");
    assert_eq!(bytes, again, "Re-encoding is not stable");
}

fn object<const N: usize>(entries: [(&str, VdfValue); N]) -> VdfValue {
    VdfValue::Object(entries.into_iter().collect())
}

// ============================================================================
// Value trees
// ============================================================================

#[test]
fn roundtrip_empty_object() {
    assert_roundtrip(&VdfValue::Object(VdfObject::new()));
}

#[test]
fn roundtrip_flat_object() {
    assert_roundtrip(&object([
        ("AppName", "Game".into()),
        ("appid", VdfValue::Integer(-1)),
        ("OpenVR", VdfValue::Integer(0)),
        ("Icon", "".into()),
    ]));
}

#[test]
fn roundtrip_nested_arrays() {
    assert_roundtrip(&object([(
        "shortcuts",
        VdfValue::Array(vec![
            object([("tags", VdfValue::Array(vec!["a".into(), "b".into()]))]),
            object([("tags", VdfValue::Object(VdfObject::new()))]),
        ]),
    )]));
}

#[test]
fn roundtrip_empty_array_becomes_empty_object() {
    // An empty array has no keys to infer from.
    let bytes = encode(&object([("tags", VdfValue::Array(vec![]))])).unwrap();
    let decoded = decode_default(&bytes).unwrap();
    assert_eq!(decoded.get("tags"), Some(&VdfValue::Object(VdfObject::new())));
}

#[test]
fn roundtrip_game_entry_scenario() {
    let input = json!({
        "AppName": "Game",
        "Exe": "\"C:\\game.exe\"",
        "tags": {"0": "favorite"}
    });
    let bytes = encode_json(&input).unwrap();
    let decoded = decode_default(&bytes).unwrap();

    let expected = object([
        ("AppName", "Game".into()),
        ("Exe", "\"C:\\game.exe\"".into()),
        ("tags", VdfValue::Array(vec!["favorite".into()])),
    ]);
    assert_eq!(decoded, expected);
    assert_eq!(decoded.get("Exe").and_then(VdfValue::as_str), Some("\"C:\\game.exe\""));
}

// ============================================================================
// Coercions through JSON
// ============================================================================

#[test]
fn roundtrip_json_with_coercions() {
    let input = json!({
        "shortcuts": [{
            "appid": 123456,
            "AppName": "Game",
            "IsHidden": false,
            "AllowOverlay": true,
            "LastPlayTime": 1700000000,
            "tags": ["favorite", "rpg"]
        }]
    });
    let bytes = encode_json(&input).unwrap();
    let decoded = decode_default(&bytes).unwrap();
    assert_eq!(decoded.to_json(), input);
}

#[test]
fn integer_one_comes_back_as_bool() {
    let bytes = encode_json(&json!({"count": 1})).unwrap();
    let decoded = decode_default(&bytes).unwrap();
    assert_eq!(decoded.to_json(), json!({"count": true}));
}

#[test]
fn zero_date_comes_back_as_false() {
    let bytes = encode_json(&json!({"LastPlayTime": 0})).unwrap();
    let decoded = decode_default(&bytes).unwrap();
    assert_eq!(decoded.to_json(), json!({"LastPlayTime": false}));
    // ...and false re-encodes to the same bytes.
    assert_eq!(encode(&decoded).unwrap(), bytes);
}

#[test]
fn coerced_tree_reencodes_identically() {
    let input = json!({
        "shortcuts": {
            "0": {"IsHidden": 1, "LastPlayTime": 1650000000, "tags": {"0": "x"}},
            "1": {"IsHidden": 0, "LastPlayTime": 0, "tags": {}}
        }
    });
    let bytes = encode_json(&input).unwrap();
    let decoded = decode_default(&bytes).unwrap();
    assert_eq!(encode(&decoded).unwrap(), bytes);
}

#[test]
fn vdf_to_json_renders_pretty_text() {
    let bytes = encode_json(&json!({"AppName": "Game", "tags": ["a"]})).unwrap();
    let text = vdf_to_json(&bytes, &DecoderConfig::default()).unwrap();
    assert_eq!(
        text,
        "{\n    \"AppName\": \"Game\",\n    \"tags\": [\n        \"a\"\n    ]\n}"
    );
}
