use serde::{Deserialize, Serialize};

/// Top-level chat widget configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Prefix for the `/api/chat/...` paths. Empty means same origin.
    pub api_base: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl BackendConfig {
    pub fn send_url(&self) -> String {
        format!("{}/api/chat/send/", self.base())
    }

    pub fn history_url(&self) -> String {
        format!("{}/api/chat/history/", self.base())
    }

    /// `conversation_id` is inserted as-is; callers encode it as a path segment.
    pub fn session_url(&self, conversation_id: &str) -> String {
        format!("{}/api/chat/session/{}/", self.base(), conversation_id)
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Key of the conversation record
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
            key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Durable storage when available, memory otherwise
    Auto,
    Memory,
    /// `window.localStorage`: survives browser restarts
    Local,
    /// `window.sessionStorage`: survives reloads, not tab closure
    Session,
}

impl StorageBackendType {
    pub fn all() -> &'static [StorageBackendType] {
        &[
            StorageBackendType::Auto,
            StorageBackendType::Memory,
            StorageBackendType::Local,
            StorageBackendType::Session,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            StorageBackendType::Auto => "Auto-detect",
            StorageBackendType::Memory => "Memory",
            StorageBackendType::Local => "Local storage",
            StorageBackendType::Session => "Session storage",
        }
    }
}

pub const DEFAULT_SESSION_KEY: &str = "mycebu_chat_session";
pub const CONFIG_STORAGE_KEY: &str = "chat:config";
