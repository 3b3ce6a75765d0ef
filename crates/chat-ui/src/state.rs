//! UI-level state that drives rendering.
//! A projection of the chat session, rebuilt from the EventBus each frame.
//! Panels read it; only the session writes the conversation itself.

use std::collections::BTreeSet;

use chat_core::markup::{parse_markup, Block};
use chat_types::conversation::ConversationSummary;
use chat_types::event::SessionEvent;
use chat_types::message::{Message, MessageStatus, Role};

/// State visible to UI panels
pub struct UiState {
    /// Bubbles in conversation order
    pub messages: Vec<ChatEntry>,
    pub conversation_id: Option<String>,
    /// Requests still waiting for a reply; one typing placeholder each
    pub typing: BTreeSet<u64>,
    pub input_text: String,
    pub active_tab: ChatTab,
    pub history: HistoryView,
    pub show_settings: bool,
    pub status_text: String,
}

/// A message bubble, with its text pre-parsed for rendering
#[derive(Clone, Debug)]
pub struct ChatEntry {
    pub message_id: String,
    pub role: Role,
    pub text: String,
    pub blocks: Vec<Block>,
    pub status: MessageStatus,
    /// Local error notice rather than a real reply
    pub is_notice: bool,
}

impl From<Message> for ChatEntry {
    fn from(message: Message) -> Self {
        // User text is shown verbatim; only replies get formatting
        let blocks = match message.role {
            Role::Assistant if !message.synthetic => parse_markup(&message.text),
            _ => Vec::new(),
        };
        Self {
            message_id: message.id,
            role: message.role,
            text: message.text,
            blocks,
            status: message.status,
            is_notice: message.synthetic,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatTab {
    Chat,
    History,
}

/// What the history tab shows
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryView {
    NotLoaded,
    Loading,
    /// Fetched fine, nothing there yet
    Empty,
    Loaded(Vec<ConversationSummary>),
    Failed(String),
}

impl UiState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            conversation_id: None,
            typing: BTreeSet::new(),
            input_text: String::new(),
            active_tab: ChatTab::Chat,
            history: HistoryView::NotLoaded,
            show_settings: false,
            status_text: "Ready".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::ConversationReset { conversation_id } => {
                    self.messages.clear();
                    self.conversation_id = conversation_id;
                }
                SessionEvent::MessageAppended { message } => {
                    self.messages.push(ChatEntry::from(message));
                }
                SessionEvent::MessageStatusChanged { message_id, status } => {
                    if let Some(entry) = self
                        .messages
                        .iter_mut()
                        .find(|e| e.message_id == message_id)
                    {
                        entry.status = status;
                    }
                }
                SessionEvent::ConversationIdAssigned { conversation_id } => {
                    self.conversation_id = Some(conversation_id);
                    // The listing no longer includes every conversation
                    if self.history != HistoryView::Loading {
                        self.history = HistoryView::NotLoaded;
                    }
                }
                SessionEvent::ConversationCleared => {
                    self.messages.clear();
                    self.conversation_id = None;
                    self.status_text = "Ready".to_string();
                }
                SessionEvent::TypingStarted { request_id } => {
                    self.typing.insert(request_id);
                    self.status_text = "Waiting for reply...".to_string();
                }
                SessionEvent::TypingStopped { request_id } => {
                    self.typing.remove(&request_id);
                    if self.typing.is_empty() {
                        self.status_text = "Ready".to_string();
                    }
                }
                SessionEvent::HistoryLoaded { summaries } => {
                    self.history = if summaries.is_empty() {
                        HistoryView::Empty
                    } else {
                        HistoryView::Loaded(summaries)
                    };
                }
                SessionEvent::HistoryFailed { message } => {
                    self.history = HistoryView::Failed(message);
                }
                SessionEvent::Error { message } => {
                    log::debug!("Showing session error: {}", message);
                    self.status_text = format!("Error: {}", message);
                }
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.typing.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
