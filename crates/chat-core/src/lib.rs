//! Chat core: the conversation session and the ports it talks through.
//!
//! Nothing in here touches the browser. Adapters for storage and the chat
//! backend live in `chat-platform`; the rendering layer only sees
//! [`event_bus::EventBus`].

pub mod ports;
pub mod event_bus;
pub mod session;
pub mod markup;
