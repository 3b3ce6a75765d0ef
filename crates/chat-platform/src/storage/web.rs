//! Web Storage backend (`localStorage` / `sessionStorage`).
//!
//! Web Storage only holds strings, so values must be UTF-8. Everything the
//! chat stores is JSON, which always is.

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use chat_core::ports::StoragePort;
use chat_types::{ChatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebStorageKind {
    /// Survives browser restarts
    Local,
    /// Survives reloads, cleared when the tab closes
    Session,
}

impl WebStorageKind {
    fn name(&self) -> &'static str {
        match self {
            WebStorageKind::Local => "localStorage",
            WebStorageKind::Session => "sessionStorage",
        }
    }
}

pub struct WebStorage {
    storage: Storage,
    kind: WebStorageKind,
}

impl WebStorage {
    /// Open the page's storage area. Fails without a window or when the
    /// browser denies access (e.g. storage disabled).
    pub fn open(kind: WebStorageKind) -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;

        let storage = match kind {
            WebStorageKind::Local => window.local_storage(),
            WebStorageKind::Session => window.session_storage(),
        }
        .map_err(js_error)?
        .ok_or_else(|| ChatError::Storage(format!("{} not available", kind.name())))?;

        Ok(Self { storage, kind })
    }
}

#[async_trait(?Send)]
impl StoragePort for WebStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.storage.get_item(key).map_err(js_error)?;
        Ok(value.map(String::into_bytes))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| ChatError::Serialization(format!("value for {} is not UTF-8: {}", key, e)))?;
        // Throws QuotaExceededError when full
        self.storage.set_item(key, text).map_err(js_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn backend_name(&self) -> &str {
        self.kind.name()
    }
}

fn js_error(e: JsValue) -> ChatError {
    ChatError::Storage(format!("{:?}", e))
}
