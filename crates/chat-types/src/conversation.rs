use serde::{Deserialize, Serialize};
use crate::message::{now_millis, Message, MessageStatus, Role};

const TITLE_MAX_CHARS: usize = 40;
const UNTITLED: &str = "New conversation";

/// The conversation currently held by the session manager
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    /// Assigned by the backend on the first successful send
    pub id: Option<String>,
    pub messages: Vec<Message>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Conversation {
    pub fn new() -> Self {
        let now = now_millis();
        Self {
            id: None,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the whole conversation with server-provided history
    pub fn from_server(id: String, messages: Vec<Message>) -> Self {
        let mut conversation = Self::new();
        conversation.id = Some(id);
        conversation.messages = messages;
        conversation
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    /// First user message, truncated to 40 characters
    pub fn title(&self) -> String {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.text.chars().take(TITLE_MAX_CHARS).collect())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn find_mut(&mut self, message_id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == message_id)
    }

    /// Snapshot suitable for the storage record
    pub fn to_record(&self) -> PersistedSession {
        PersistedSession {
            conversation_id: self.id.clone(),
            messages: self
                .messages
                .iter()
                .filter(|m| !m.synthetic)
                .cloned()
                .collect(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored record has no request behind it, so a `Pending` message in it
/// never got its answer and is read back as `Failed`.
impl From<PersistedSession> for Conversation {
    fn from(record: PersistedSession) -> Self {
        let now = now_millis();
        let messages = record
            .messages
            .into_iter()
            .map(|mut m| {
                if m.status == MessageStatus::Pending {
                    m.status = MessageStatus::Failed;
                }
                m
            })
            .collect();
        Self {
            id: record.conversation_id,
            messages,
            created_at: record.created_at.unwrap_or(now),
            updated_at: record.updated_at.unwrap_or(now),
        }
    }
}

/// The single record mirrored to browser storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Summary of a past conversation, as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub title: String,
    /// Backend-formatted date, kept verbatim
    pub updated_at: String,
}
