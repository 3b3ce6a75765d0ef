//! WASM-target tests for chat-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`. Exercises the `js` uuid backend and the
//! `wasmbind` chrono clock.

use wasm_bindgen_test::*;

use chat_types::message::*;
use chat_types::conversation::*;
use chat_types::wire::*;
use chat_types::config::*;
use chat_types::error::*;

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_has_id_and_timestamp() {
    let msg = Message::pending_user("Hello");
    assert!(!msg.id.is_empty());
    assert!(msg.timestamp > 0);
    assert_eq!(msg.status, MessageStatus::Pending);
}

#[wasm_bindgen_test]
fn role_accepts_bot_alias() {
    let role: Role = serde_json::from_str(r#""bot""#).unwrap();
    assert_eq!(role, Role::Assistant);
}

// ─── Conversation Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn conversation_record_roundtrip() {
    let mut conv = Conversation::new();
    conv.id = Some("c1".to_string());
    conv.messages.push(Message::user("Hello"));
    conv.messages.push(Message::assistant("Hi"));
    conv.messages.push(Message::notice("Error: x"));

    let bytes = serde_json::to_vec(&conv.to_record()).unwrap();
    let record: PersistedSession = serde_json::from_slice(&bytes).unwrap();
    let restored = Conversation::from(record);
    assert_eq!(restored.id.as_deref(), Some("c1"));
    assert_eq!(restored.messages.len(), 2);
    assert_eq!(restored.messages[..], conv.messages[..2]);
}

#[wasm_bindgen_test]
fn conversation_title() {
    let mut conv = Conversation::new();
    conv.messages.push(Message::user("Garbage collection schedule"));
    assert_eq!(conv.title(), "Garbage collection schedule");
}

// ─── Wire Tests ──────────────────────────────────────────

#[wasm_bindgen_test]
fn send_response_failure_is_application_error() {
    let resp: SendResponse =
        serde_json::from_str(r#"{"success":false,"error":"rate limited"}"#).unwrap();
    let err = resp.into_reply().unwrap_err();
    assert_eq!(err, ChatError::Application("rate limited".to_string()));
    assert!(!err.is_transport());
}

#[wasm_bindgen_test]
fn session_response_maps_bot_to_assistant() {
    let resp: SessionResponse = serde_json::from_str(
        r#"{"success":true,"messages":[{"text":"Hi","type":"bot"}]}"#,
    )
    .unwrap();
    let messages = resp.into_messages().unwrap();
    assert_eq!(messages[0].role, Role::Assistant);
}

// ─── Config Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn config_serialization_roundtrip() {
    let config = ChatConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: ChatConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
