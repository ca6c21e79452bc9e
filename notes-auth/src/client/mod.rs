mod config;
mod kv_store;
mod token_storage;

pub use config::{BackendMode, Settings, StorageKind};
pub use kv_store::{FileStore, KeyValueStore, MemoryStore};
pub use token_storage::{
    prefixed_note_token, AuthHeaders, TokenStore, NOTE_TOKEN_HEADER, NOTE_TOKEN_PREFIX, TOKEN_KEY,
};
