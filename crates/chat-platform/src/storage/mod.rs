pub mod memory;
pub mod web;
pub mod open;

pub use memory::MemoryStorage;
pub use web::{WebStorage, WebStorageKind};
pub use open::open_storage;
