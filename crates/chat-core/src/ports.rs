//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chat_types::{
    Result,
    conversation::ConversationSummary,
    message::Message,
    wire::{SendReply, SendRequest},
};

// ─── Chat Backend Port ───────────────────────────────────────

/// The remote chat service.
///
/// A refusal by the backend (`success: false`) is reported as
/// `ChatError::Application`; everything else that goes wrong on the way is a
/// transport error (see `ChatError::is_transport`).
#[async_trait(?Send)]
pub trait ChatBackendPort {
    /// Send a prompt, optionally continuing an existing conversation
    async fn send(&self, req: SendRequest) -> Result<SendReply>;

    /// Summaries of past conversations
    async fn history(&self) -> Result<Vec<ConversationSummary>>;

    /// Full message sequence of one conversation, in server order
    async fn session(&self, conversation_id: &str) -> Result<Vec<Message>>;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
