// Session & credential store shared by every notes backend
mod client;
mod error;

pub use client::{
    prefixed_note_token, AuthHeaders, BackendMode, FileStore, KeyValueStore, MemoryStore,
    Settings, StorageKind, TokenStore, NOTE_TOKEN_HEADER, NOTE_TOKEN_PREFIX, TOKEN_KEY,
};
pub use error::AuthError;
