//! Pick the storage backend named in the config.
//!
//! Auto prefers localStorage so a conversation survives a browser restart.
//! Any Web Storage failure falls back to memory: the chat keeps working,
//! it just forgets on reload.

use std::rc::Rc;
use chat_core::ports::StoragePort;
use chat_types::config::StorageBackendType;
use super::{MemoryStorage, WebStorage, WebStorageKind};

/// Returns a trait object so callers are backend-agnostic.
pub fn open_storage(backend: &StorageBackendType) -> Rc<dyn StoragePort> {
    let kind = match backend {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            return Rc::new(MemoryStorage::new());
        }
        StorageBackendType::Auto | StorageBackendType::Local => WebStorageKind::Local,
        StorageBackendType::Session => WebStorageKind::Session,
    };

    match WebStorage::open(kind) {
        Ok(storage) => {
            log::info!("Storage backend: {}", storage.backend_name());
            Rc::new(storage)
        }
        Err(e) => {
            log::warn!("Web Storage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
