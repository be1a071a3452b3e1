#![allow(clippy::float_cmp)]

use super::*;
use serde_json::json;

fn session(id: &str) -> Session {
    Session { id: id.to_owned(), color: PaletteColor::Blue, cursor_x: 1.5, cursor_y: -2.0 }
}

#[test]
fn word_serializes_with_camel_case_keys() {
    let word = Word { id: 7, text: "love".into(), x: 500.0, y: 300.0, on_canvas: true };
    let value = serde_json::to_value(&word).expect("serialize");
    assert_eq!(value, json!({"id": 7, "text": "love", "x": 500.0, "y": 300.0, "onCanvas": true}));
}

#[test]
fn new_word_starts_in_tray_at_origin() {
    let word = Word::new(3, "moon");
    assert!(!word.on_canvas);
    assert_eq!(word.x, 0.0);
    assert_eq!(word.y, 0.0);
}

#[test]
fn session_serializes_color_as_hex() {
    let value = serde_json::to_value(session("abc")).expect("serialize");
    assert_eq!(value, json!({"id": "abc", "color": "#BAE1FF", "cursorX": 1.5, "cursorY": -2.0}));
}

#[test]
fn palette_hex_matches_serde_name() {
    for color in PaletteColor::ALL {
        let value = serde_json::to_value(color).expect("serialize");
        assert_eq!(value.as_str(), Some(color.hex()));
        assert_eq!(color.to_string(), color.hex());
    }
}

#[test]
fn palette_has_ten_distinct_colors() {
    let mut hexes: Vec<&str> = PaletteColor::ALL.iter().map(|c| c.hex()).collect();
    hexes.sort_unstable();
    hexes.dedup();
    assert_eq!(hexes.len(), 10);
}

#[test]
fn word_moved_uses_wire_field_names() {
    let msg = ServerMessage::WordMoved { word_id: 4, x: 10.0, y: 20.0, moved_by: "c1".into() };
    let value = serde_json::to_value(&msg).expect("serialize");
    assert_eq!(value, json!({"type": "wordMoved", "wordId": 4, "x": 10.0, "y": 20.0, "movedBy": "c1"}));
}

#[test]
fn word_added_and_removed_use_wire_field_names() {
    let added = ServerMessage::WordAddedToCanvas { word_id: 0, x: 500.0, y: 300.0, added_by: "a".into() };
    let removed = ServerMessage::WordRemovedFromCanvas { word_id: 0, removed_by: "b".into() };
    assert_eq!(
        serde_json::to_value(&added).expect("serialize"),
        json!({"type": "wordAddedToCanvas", "wordId": 0, "x": 500.0, "y": 300.0, "addedBy": "a"})
    );
    assert_eq!(
        serde_json::to_value(&removed).expect("serialize"),
        json!({"type": "wordRemovedFromCanvas", "wordId": 0, "removedBy": "b"})
    );
}

#[test]
fn cursor_moved_uses_wire_field_names() {
    let msg = ServerMessage::CursorMoved { client_id: "c9".into(), x: 1.0, y: 2.0, color: PaletteColor::Pink };
    let value = serde_json::to_value(&msg).expect("serialize");
    assert_eq!(value, json!({"type": "cursorMoved", "clientId": "c9", "x": 1.0, "y": 2.0, "color": "#FFC9DE"}));
}

#[test]
fn init_includes_client_id_when_present() {
    let msg = ServerMessage::Init {
        client_id: Some("me".into()),
        words: vec![Word::new(0, "a")],
        clients: vec![session("me")],
    };
    let value = serde_json::to_value(&msg).expect("serialize");
    assert_eq!(value["type"], "init");
    assert_eq!(value["clientId"], "me");
    assert_eq!(value["words"][0]["onCanvas"], false);
    assert_eq!(value["clients"][0]["id"], "me");
}

#[test]
fn init_without_client_id_still_decodes() {
    let text = r#"{"type":"init","words":[],"clients":[]}"#;
    let msg = decode_server_message(text).expect("decode");
    assert_eq!(msg, ServerMessage::Init { client_id: None, words: vec![], clients: vec![] });
}

#[test]
fn kind_matches_serialized_type_tag() {
    let messages = [
        ServerMessage::Init { client_id: None, words: vec![], clients: vec![] },
        ServerMessage::WordMoved { word_id: 1, x: 0.0, y: 0.0, moved_by: String::new() },
        ServerMessage::WordAddedToCanvas { word_id: 1, x: 0.0, y: 0.0, added_by: String::new() },
        ServerMessage::WordRemovedFromCanvas { word_id: 1, removed_by: String::new() },
        ServerMessage::Clients { clients: vec![] },
        ServerMessage::CursorMoved { client_id: String::new(), x: 0.0, y: 0.0, color: PaletteColor::Red },
    ];
    for msg in messages {
        let value = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(value["type"], msg.kind());
        assert!(ServerMessage::TYPES.contains(&msg.kind()));
    }
}

#[test]
fn decode_client_move_word() {
    let msg = decode_client_message(r#"{"type":"moveWord","wordId":3,"x":12.5,"y":40}"#).expect("decode");
    assert_eq!(msg, ClientMessage::MoveWord { word_id: 3, x: 12.5, y: 40.0 });
    assert_eq!(msg.kind(), "moveWord");
}

#[test]
fn decode_client_add_ignores_extra_rotation_field() {
    let msg = decode_client_message(r#"{"type":"addToCanvas","wordId":0,"x":500,"y":300,"rotation":2.5}"#)
        .expect("decode");
    assert_eq!(msg, ClientMessage::AddToCanvas { word_id: 0, x: 500.0, y: 300.0 });
}

#[test]
fn decode_client_remove_and_cursor() {
    assert_eq!(
        decode_client_message(r#"{"type":"removeFromCanvas","wordId":9}"#).expect("decode"),
        ClientMessage::RemoveFromCanvas { word_id: 9 }
    );
    assert_eq!(
        decode_client_message(r#"{"type":"cursor","x":-4,"y":8.25}"#).expect("decode"),
        ClientMessage::Cursor { x: -4.0, y: 8.25 }
    );
}

#[test]
fn decode_rejects_malformed_json() {
    let err = decode_client_message("{not json").expect_err("should fail");
    assert!(matches!(err, DecodeError::Json(_)));
}

#[test]
fn decode_rejects_missing_type() {
    let err = decode_client_message(r#"{"wordId":1}"#).expect_err("should fail");
    assert!(matches!(err, DecodeError::MissingType));
    let err = decode_client_message("[1,2,3]").expect_err("should fail");
    assert!(matches!(err, DecodeError::MissingType));
}

#[test]
fn decode_reports_unknown_type_by_name() {
    let err = decode_client_message(r#"{"type":"explode","wordId":1}"#).expect_err("should fail");
    match err {
        DecodeError::UnknownType(kind) => assert_eq!(kind, "explode"),
        other => panic!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn decode_rejects_server_type_on_client_channel() {
    let err = decode_client_message(r#"{"type":"wordMoved","wordId":1,"x":0,"y":0,"movedBy":"x"}"#)
        .expect_err("should fail");
    assert!(matches!(err, DecodeError::UnknownType(_)));
}

#[test]
fn decode_rejects_missing_required_field() {
    let err = decode_client_message(r#"{"type":"moveWord","wordId":1,"x":3}"#).expect_err("should fail");
    match err {
        DecodeError::Invalid { kind, .. } => assert_eq!(kind, "moveWord"),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn decode_rejects_negative_word_id() {
    let err = decode_client_message(r#"{"type":"removeFromCanvas","wordId":-1}"#).expect_err("should fail");
    assert!(matches!(err, DecodeError::Invalid { .. }));
}

#[test]
fn encode_then_decode_server_clients_message() {
    let msg = ServerMessage::Clients { clients: vec![session("a"), session("b")] };
    let text = encode_server_message(&msg).expect("encode");
    assert_eq!(decode_server_message(&text).expect("decode"), msg);
}

#[test]
fn encode_client_cursor_is_flat_object() {
    let text = encode_client_message(&ClientMessage::Cursor { x: 1.0, y: 2.0 }).expect("encode");
    let value: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value, json!({"type": "cursor", "x": 1.0, "y": 2.0}));
}
