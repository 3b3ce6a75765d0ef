use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// The backend answered with `success: false`
    #[error("{0}")]
    Application(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// Superseded by a newer request before it could be applied
    #[error("Cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

}

impl ChatError {
    /// Failures of the exchange itself rather than a refusal by the backend
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ChatError::Network(_)
                | ChatError::Timeout(_)
                | ChatError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
