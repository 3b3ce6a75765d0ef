//! Conversation session: the local replica of one backend conversation.
//!
//! The session owns the current [`Conversation`], mirrors it to storage after
//! every committed change, and reconciles it with the chat backend:
//!
//! 1. A sent message is appended as `Pending` and persisted before the request
//!    goes out (optimistic write).
//! 2. The reply confirms it and appends the assistant message, or marks it
//!    `Failed` and appends a local error notice that is never persisted.
//! 3. Replacing the conversation (new chat, loading from history, restoring)
//!    bumps a generation counter. Replies carrying an older generation are
//!    dropped instead of leaking into the new conversation.
//!
//! The handle is clone-cheap and single-threaded. State is never borrowed
//! across an `.await`, so the UI can start a new conversation while a send is
//! still waiting on the network.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use chat_types::{
    ChatError, Result,
    conversation::{Conversation, ConversationSummary, PersistedSession},
    event::SessionEvent,
    message::{Message, MessageStatus},
    wire::{SendReply, SendRequest},
};
use crate::event_bus::EventBus;
use crate::ports::{ChatBackendPort, StoragePort};

/// Bubble text for failures that never reached a backend decision
pub const NETWORK_ERROR_TEXT: &str =
    "Network error. Please check your connection and try again.";

/// How a call to [`ChatSession::send_message`] ended
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Empty input; nothing happened
    Rejected,
    /// The backend replied and the exchange is persisted
    Delivered,
    /// An error notice was shown; the user message stays persisted as sent
    Failed(ChatError),
    /// The conversation was replaced before the reply arrived
    Discarded,
}

/// Identifies one outstanding request and the conversation it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequestToken {
    request_id: u64,
    generation: u64,
}

struct SessionState {
    conversation: Conversation,
    generation: u64,
    next_request_id: u64,
    latest_load: u64,
    in_flight: BTreeSet<u64>,
    /// Retired by [`ChatSession::close`]; storage belongs to a successor
    closed: bool,
}

impl SessionState {
    fn new() -> Self {
        Self {
            conversation: Conversation::new(),
            generation: 0,
            next_request_id: 0,
            latest_load: 0,
            in_flight: BTreeSet::new(),
            closed: false,
        }
    }

    fn begin_request(&mut self) -> RequestToken {
        self.next_request_id += 1;
        self.in_flight.insert(self.next_request_id);
        RequestToken {
            request_id: self.next_request_id,
            generation: self.generation,
        }
    }

    /// Swap in another conversation. Returns the requests it orphaned.
    fn replace(&mut self, conversation: Conversation) -> Vec<u64> {
        self.conversation = conversation;
        self.orphan_requests()
    }

    fn orphan_requests(&mut self) -> Vec<u64> {
        self.generation += 1;
        std::mem::take(&mut self.in_flight).into_iter().collect()
    }
}

/// The conversation session manager
#[derive(Clone)]
pub struct ChatSession {
    state: Rc<RefCell<SessionState>>,
    backend: Rc<dyn ChatBackendPort>,
    storage: Rc<dyn StoragePort>,
    event_bus: EventBus,
    storage_key: Rc<str>,
}

impl ChatSession {
    pub fn new(
        backend: Rc<dyn ChatBackendPort>,
        storage: Rc<dyn StoragePort>,
        event_bus: EventBus,
        storage_key: &str,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(SessionState::new())),
            backend,
            storage,
            event_bus,
            storage_key: Rc::from(storage_key),
        }
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn conversation_id(&self) -> Option<String> {
        self.state.borrow().conversation.id.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().conversation.messages.clone()
    }

    pub fn conversation(&self) -> Conversation {
        self.state.borrow().conversation.clone()
    }

    pub fn title(&self) -> String {
        self.state.borrow().conversation.title()
    }

    /// Whether any request is still waiting for the backend
    pub fn is_waiting(&self) -> bool {
        !self.state.borrow().in_flight.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    // ─── Operations ──────────────────────────────────────────

    /// Load the stored conversation, if any, and redraw it.
    ///
    /// Never touches the network. An unreadable record is logged and treated
    /// as absent. Returns the number of restored messages.
    pub async fn restore_session(&self) -> usize {
        let record = match self.read_record().await {
            Ok(Some(record)) => record,
            Ok(None) => return 0,
            Err(e) => {
                log::warn!("Ignoring stored conversation: {}", e);
                return 0;
            }
        };

        let conversation = Conversation::from(record);
        let count = conversation.messages.len();
        log::info!(
            "Restored {} messages (conversation {:?}) from {}",
            count,
            conversation.id,
            self.storage.backend_name()
        );
        self.replace_and_redraw(conversation);
        count
    }

    /// Send a user message and append the reply.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let prompt = text.trim();
        if prompt.is_empty() {
            return SendOutcome::Rejected;
        }
        if self.is_closed() {
            log::warn!("Ignoring message sent to a closed session");
            return SendOutcome::Rejected;
        }

        let user_msg = Message::pending_user(prompt);
        let user_msg_id = user_msg.id.clone();
        let (token, conversation_id) = {
            let mut state = self.state.borrow_mut();
            state.conversation.messages.push(user_msg.clone());
            state.conversation.touch();
            (state.begin_request(), state.conversation.id.clone())
        };
        self.event_bus.emit(SessionEvent::MessageAppended { message: user_msg });
        self.persist().await;

        self.event_bus.emit(SessionEvent::TypingStarted {
            request_id: token.request_id,
        });
        let result = self
            .backend
            .send(SendRequest {
                prompt: prompt.to_string(),
                conversation_id,
            })
            .await;

        let outcome = self.settle_send(token, &user_msg_id, result);
        if outcome == SendOutcome::Delivered {
            self.persist().await;
        }
        outcome
    }

    /// Forget the current conversation, locally and in storage.
    pub async fn start_new_conversation(&self) {
        let orphaned = self.state.borrow_mut().replace(Conversation::new());
        self.emit_typing_stopped(orphaned);
        self.event_bus.emit(SessionEvent::ConversationCleared);

        if self.is_closed() {
            return;
        }
        if let Err(e) = self.storage.delete(&self.storage_key).await {
            log::warn!("Failed to clear stored conversation: {}", e);
        }
    }

    /// Fetch past conversation summaries. Does not touch local state.
    ///
    /// `Ok` with an empty list means there is no history; `Err` means it
    /// could not be fetched.
    pub async fn list_history_summaries(&self) -> Result<Vec<ConversationSummary>> {
        match self.backend.history().await {
            Ok(summaries) => {
                self.event_bus.emit(SessionEvent::HistoryLoaded {
                    summaries: summaries.clone(),
                });
                Ok(summaries)
            }
            Err(e) => {
                log::warn!("History unavailable: {}", e);
                self.event_bus.emit(SessionEvent::HistoryFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Replace the current conversation with the server's copy of another.
    ///
    /// On failure the current conversation is left as it was. A load that is
    /// overtaken by a newer load or by a new conversation returns
    /// `ChatError::Cancelled` and changes nothing.
    pub async fn load_conversation(&self, conversation_id: &str) -> Result<usize> {
        let (ticket, generation) = {
            let mut state = self.state.borrow_mut();
            state.latest_load += 1;
            (state.latest_load, state.generation)
        };

        let messages = match self.backend.session(conversation_id).await {
            Ok(messages) => messages,
            Err(e) => {
                log::warn!("Failed to load conversation {}: {}", conversation_id, e);
                self.event_bus.emit(SessionEvent::Error {
                    message: format!("Could not open conversation: {}", e),
                });
                return Err(e);
            }
        };

        {
            let state = self.state.borrow();
            if state.latest_load != ticket || state.generation != generation {
                log::info!("Dropping superseded load of conversation {}", conversation_id);
                return Err(ChatError::Cancelled);
            }
        }

        let count = messages.len();
        self.replace_and_redraw(Conversation::from_server(conversation_id.to_string(), messages));
        self.persist().await;
        Ok(count)
    }

    /// Retire this session before another one takes over its storage key.
    ///
    /// Replies and loads still outstanding are dropped when they arrive, and
    /// the session never writes or deletes the stored record again.
    pub fn close(&self) {
        let orphaned = {
            let mut state = self.state.borrow_mut();
            state.closed = true;
            state.orphan_requests()
        };
        log::info!("Closing session ({} requests outstanding)", orphaned.len());
        self.emit_typing_stopped(orphaned);
    }

    // ─── Internals ───────────────────────────────────────────

    fn settle_send(
        &self,
        token: RequestToken,
        user_msg_id: &str,
        result: Result<SendReply>,
    ) -> SendOutcome {
        let mut state = self.state.borrow_mut();
        let live = state.in_flight.remove(&token.request_id);

        if token.generation != state.generation {
            log::info!(
                "Discarding reply to request {} from a replaced conversation",
                token.request_id
            );
            drop(state);
            if live {
                self.emit_typing_stopped(vec![token.request_id]);
            }
            return SendOutcome::Discarded;
        }

        let mut events = Vec::new();
        let outcome = match result {
            Ok(reply) => {
                if let Some(msg) = state.conversation.find_mut(user_msg_id) {
                    msg.status = MessageStatus::Confirmed;
                }
                events.push(SessionEvent::MessageStatusChanged {
                    message_id: user_msg_id.to_string(),
                    status: MessageStatus::Confirmed,
                });

                // An id is adopted once; later replies must not re-home the conversation.
                if let Some(assigned) = reply.conversation_id {
                    match state.conversation.id.clone() {
                        None => {
                            log::info!("Conversation assigned id {}", assigned);
                            state.conversation.id = Some(assigned.clone());
                            events.push(SessionEvent::ConversationIdAssigned {
                                conversation_id: assigned,
                            });
                        }
                        Some(current) if current != assigned => {
                            log::warn!(
                                "Backend answered with conversation {} while continuing {}",
                                assigned,
                                current
                            );
                        }
                        Some(_) => {}
                    }
                }

                let reply_msg = Message::assistant(reply.message);
                state.conversation.messages.push(reply_msg.clone());
                state.conversation.touch();
                events.push(SessionEvent::MessageAppended { message: reply_msg });
                SendOutcome::Delivered
            }
            Err(e) => {
                log::warn!("Send failed: {}", e);
                if let Some(msg) = state.conversation.find_mut(user_msg_id) {
                    msg.status = MessageStatus::Failed;
                }
                events.push(SessionEvent::MessageStatusChanged {
                    message_id: user_msg_id.to_string(),
                    status: MessageStatus::Failed,
                });

                let notice = Message::notice(failure_text(&e));
                state.conversation.messages.push(notice.clone());
                events.push(SessionEvent::MessageAppended { message: notice });
                SendOutcome::Failed(e)
            }
        };
        drop(state);

        if live {
            events.push(SessionEvent::TypingStopped {
                request_id: token.request_id,
            });
        }
        self.event_bus.emit_all(events);
        outcome
    }

    fn replace_and_redraw(&self, conversation: Conversation) {
        let conversation_id = conversation.id.clone();
        let messages = conversation.messages.clone();
        let orphaned = self.state.borrow_mut().replace(conversation);

        self.emit_typing_stopped(orphaned);
        self.event_bus
            .emit(SessionEvent::ConversationReset { conversation_id });
        self.event_bus.emit_all(
            messages
                .into_iter()
                .map(|message| SessionEvent::MessageAppended { message }),
        );
    }

    fn emit_typing_stopped(&self, request_ids: Vec<u64>) {
        self.event_bus.emit_all(
            request_ids
                .into_iter()
                .map(|request_id| SessionEvent::TypingStopped { request_id }),
        );
    }

    async fn read_record(&self) -> Result<Option<PersistedSession>> {
        match self.storage.get(&self.storage_key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Mirror the current conversation to storage. Failures are logged only.
    async fn persist(&self) {
        if self.is_closed() {
            return;
        }
        let record = self.state.borrow().conversation.to_record();
        let bytes = match serde_json::to_vec(&record) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Failed to serialize conversation: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.storage_key, &bytes).await {
            log::warn!("Failed to persist conversation: {}", e);
        }
    }
}

/// Text of the notice that stands in for a reply
pub fn failure_text(error: &ChatError) -> String {
    if error.is_transport() {
        NETWORK_ERROR_TEXT.to_string()
    } else {
        format!("Error: {}", error)
    }
}
