use serde::{Deserialize, Serialize};
use crate::conversation::ConversationSummary;
use crate::message::{Message, MessageStatus};

/// Events emitted by the session manager.
/// The rendering layer subscribes to these and redraws accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Drop everything on screen; the messages that follow rebuild it
    ConversationReset { conversation_id: Option<String> },

    /// A bubble to draw at the end of the conversation
    MessageAppended { message: Message },

    /// A drawn message moved to another commit state
    MessageStatusChanged { message_id: String, status: MessageStatus },

    /// The backend assigned an id to the current conversation
    ConversationIdAssigned { conversation_id: String },

    /// The user started over; show the empty placeholder
    ConversationCleared,

    /// A request went out; show one typing placeholder for it
    TypingStarted { request_id: u64 },

    /// The request finished (in any way); remove its placeholder
    TypingStopped { request_id: u64 },

    /// History listing arrived (possibly empty)
    HistoryLoaded { summaries: Vec<ConversationSummary> },

    /// History listing could not be fetched
    HistoryFailed { message: String },

    /// A non-fatal error outside of a send
    Error { message: String },
}
