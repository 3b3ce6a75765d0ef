use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// The backend's reply. Older records and the session endpoint call it "bot".
    #[serde(alias = "bot")]
    Assistant,
}

/// Commit state of a message.
///
/// A user message is `Pending` from the optimistic write until the backend
/// answers, then either `Confirmed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    #[default]
    Confirmed,
    Failed,
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Client-side identifier, used to address status transitions
    #[serde(default = "new_message_id")]
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    #[serde(default)]
    pub status: MessageStatus,
    /// Locally generated notice (error bubble). Never persisted.
    #[serde(skip)]
    pub synthetic: bool,
}

impl Message {
    fn new(role: Role, text: impl Into<String>, status: MessageStatus) -> Self {
        Self {
            id: new_message_id(),
            role,
            text: text.into(),
            timestamp: now_millis(),
            status,
            synthetic: false,
        }
    }

    /// An optimistic user message, not yet acknowledged by the backend
    pub fn pending_user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, MessageStatus::Pending)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, MessageStatus::Confirmed)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text, MessageStatus::Confirmed)
    }

    /// An error bubble shown in place of a reply
    pub fn notice(text: impl Into<String>) -> Self {
        let mut msg = Self::new(Role::Assistant, text, MessageStatus::Failed);
        msg.synthetic = true;
        msg
    }
}

pub fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
