//! JSON bodies exchanged with the chat backend.
//!
//! Every response carries a `success` flag. A body without it does not
//! decode at all, which makes it a transport error. The remaining fields are
//! only meaningful for one side of the flag, so they are optional here and
//! validated by the `into_*` helpers.

use serde::{Deserialize, Serialize};
use crate::{
    ChatError, Result,
    conversation::ConversationSummary,
    message::{Message, Role},
};

/// `POST /api/chat/send/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendRequest {
    pub prompt: String,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful reply to a sent prompt
#[derive(Debug, Clone, PartialEq)]
pub struct SendReply {
    pub message: String,
    pub conversation_id: Option<String>,
}

impl SendResponse {
    pub fn into_reply(self) -> Result<SendReply> {
        if !self.success {
            return Err(application_error(self.error));
        }
        let message = self
            .message
            .ok_or_else(|| ChatError::Serialization("send response has no message".to_string()))?;
        Ok(SendReply {
            message,
            conversation_id: self.conversation_id,
        })
    }
}

/// `GET /api/chat/history/`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub conversation_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
}

impl HistoryResponse {
    pub fn into_summaries(self) -> Result<Vec<ConversationSummary>> {
        if !self.success {
            return Err(application_error(self.error));
        }
        Ok(self
            .history
            .into_iter()
            .map(|e| ConversationSummary {
                conversation_id: e.conversation_id,
                title: e.title,
                updated_at: e.date,
            })
            .collect())
    }
}

/// `GET /api/chat/session/{id}/`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<SessionEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionEntry {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: Role,
}

impl SessionResponse {
    /// Server history as confirmed messages, in server order
    pub fn into_messages(self) -> Result<Vec<Message>> {
        if !self.success {
            return Err(application_error(self.error));
        }
        Ok(self
            .messages
            .into_iter()
            .map(|e| match e.kind {
                Role::User => Message::user(e.text),
                Role::Assistant => Message::assistant(e.text),
            })
            .collect())
    }
}

/// Body of a non-2xx response, when the server bothered to send one
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn application_error(error: Option<String>) -> ChatError {
    ChatError::Application(error.unwrap_or_else(|| "request failed".to_string()))
}
