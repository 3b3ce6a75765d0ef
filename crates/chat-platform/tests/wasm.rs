//! WASM-target tests for chat-platform (Node.js runtime).
//!
//! Tests MemoryStorage, backend selection, cookie parsing, and response
//! decoding under wasm32-unknown-unknown via `wasm-pack test --node`.
//!
//! Node has no `window`, so Web Storage always falls back to memory here.

use wasm_bindgen_test::*;

use chat_core::ports::StoragePort;
use chat_platform::backend::http::decode_body;
use chat_platform::backend::HttpChatBackend;
use chat_platform::cookie::{cookie_value, document_cookie};
use chat_platform::storage::{open_storage, MemoryStorage, WebStorage, WebStorageKind};
use chat_types::config::{BackendConfig, StorageBackendType};
use chat_types::wire::{HistoryResponse, SendResponse};
use chat_types::ChatError;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    assert!(storage.get("nonexistent").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_set_overwrite_delete() {
    let storage = MemoryStorage::new();
    storage.set("mycebu_chat_session", b"v1").await.unwrap();
    storage.set("mycebu_chat_session", b"v2").await.unwrap();
    assert_eq!(
        storage.get("mycebu_chat_session").await.unwrap(),
        Some(b"v2".to_vec())
    );

    storage.delete("mycebu_chat_session").await.unwrap();
    assert!(storage.get("mycebu_chat_session").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_delete_nonexistent() {
    let storage = MemoryStorage::new();
    storage.delete("nonexistent").await.unwrap();
}

// ─── Backend Selection Tests ─────────────────────────────

#[wasm_bindgen_test]
fn open_storage_memory() {
    let storage = open_storage(&StorageBackendType::Memory);
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
fn open_storage_falls_back_without_window() {
    for backend in StorageBackendType::all() {
        let storage = open_storage(backend);
        assert_eq!(storage.backend_name(), "memory");
    }
}

#[wasm_bindgen_test]
fn web_storage_needs_window() {
    let result = WebStorage::open(WebStorageKind::Local);
    assert!(matches!(result, Err(ChatError::Storage(_))));
}

// ─── Cookie Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn cookie_value_found() {
    let cookies = "sessionid=abc; csrftoken=Xy12Z; theme=dark";
    assert_eq!(cookie_value(cookies, "csrftoken"), Some("Xy12Z".to_string()));
    assert_eq!(cookie_value(cookies, "sessionid"), Some("abc".to_string()));
}

#[wasm_bindgen_test]
fn cookie_value_exact_name_match() {
    let cookies = "xcsrftoken=wrong; csrftoken=right";
    assert_eq!(cookie_value(cookies, "csrftoken"), Some("right".to_string()));
}

#[wasm_bindgen_test]
fn cookie_value_missing_or_empty() {
    assert_eq!(cookie_value("", "csrftoken"), None);
    assert_eq!(cookie_value("theme=dark", "csrftoken"), None);
    assert_eq!(cookie_value("csrftoken=", "csrftoken"), Some(String::new()));
}

#[wasm_bindgen_test]
fn document_cookie_without_document() {
    assert_eq!(document_cookie("csrftoken"), None);
}

// ─── Response Decoding Tests ─────────────────────────────

#[wasm_bindgen_test]
fn decode_send_success() {
    let body: SendResponse = decode_body(
        200,
        r#"{"success":true,"message":"Hi","conversation_id":"c1"}"#,
    )
    .unwrap();
    let reply = body.into_reply().unwrap();
    assert_eq!(reply.message, "Hi");
    assert_eq!(reply.conversation_id.as_deref(), Some("c1"));
}

#[wasm_bindgen_test]
fn decode_error_status_with_error_body() {
    let result = decode_body::<SendResponse>(401, r#"{"error":"Authentication required"}"#);
    assert_eq!(
        result.unwrap_err(),
        ChatError::Application("Authentication required".to_string())
    );
}

#[wasm_bindgen_test]
fn decode_error_status_without_body_is_transport() {
    let err = decode_body::<SendResponse>(502, "<html>Bad Gateway</html>").unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().contains("HTTP 502"));
}

#[wasm_bindgen_test]
fn decode_2xx_without_success_flag_is_transport() {
    let err = decode_body::<SendResponse>(200, r#"{"reply":"hi"}"#).unwrap_err();
    assert!(matches!(err, ChatError::Serialization(_)));
    assert!(err.is_transport());
}

#[wasm_bindgen_test]
fn decode_malformed_success_is_transport() {
    let err = decode_body::<HistoryResponse>(200, "not json").unwrap_err();
    assert!(matches!(err, ChatError::Serialization(_)));
}

// ─── HttpChatBackend Tests ───────────────────────────────

#[wasm_bindgen_test]
fn http_backend_keeps_config() {
    let config = BackendConfig {
        api_base: "https://mycebu.example".to_string(),
        ..BackendConfig::default()
    };
    let backend = HttpChatBackend::new(config);
    assert_eq!(
        backend.config().session_url("c1"),
        "https://mycebu.example/api/chat/session/c1/"
    );
}

#[wasm_bindgen_test]
fn http_backend_encodes_session_id() {
    let config = BackendConfig {
        api_base: "https://mycebu.example".to_string(),
        ..BackendConfig::default()
    };
    let backend = HttpChatBackend::new(config);
    assert_eq!(
        backend.session_endpoint("a/b?c#d"),
        "https://mycebu.example/api/chat/session/a%2Fb%3Fc%23d/"
    );
    assert_eq!(
        backend.session_endpoint("c1"),
        "https://mycebu.example/api/chat/session/c1/"
    );
}
