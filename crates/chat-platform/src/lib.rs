//! Browser adapters for the chat core.
//!
//! - [`storage`]: `StoragePort` over Web Storage, with an in-memory fallback
//! - [`backend`]: `ChatBackendPort` over `fetch()` (gloo-net)
//! - [`cookie`]: CSRF token lookup for the backend's POST requests

pub mod storage;
pub mod backend;
pub mod cookie;
