use notes_auth::{KeyValueStore, MemoryStore, Settings, StorageKind};
use std::sync::Arc;

use crate::client::NotesClient;

/// Settings for tests: in-memory storage and no artificial latency.
pub fn test_settings() -> Settings {
    Settings {
        storage: StorageKind::Memory,
        mock_delay_ms: 0,
        ..Settings::default()
    }
}

/// Mock-mode client on a fresh in-memory store.
pub fn mock_client() -> NotesClient {
    mock_client_with_store(Arc::new(MemoryStore::new()))
}

/// Mock-mode client on a caller-provided store, so a test can inspect or
/// share the persisted state.
pub fn mock_client_with_store(store: Arc<dyn KeyValueStore>) -> NotesClient {
    NotesClient::with_store(&test_settings(), store).expect("mock client always builds")
}

/// Remote-mode client pointed at `base_url` on a fresh in-memory store.
pub fn remote_client(base_url: &str) -> NotesClient {
    let settings = Settings {
        api_base_url: Some(base_url.to_string()),
        ..test_settings()
    };
    NotesClient::with_store(&settings, Arc::new(MemoryStore::new()))
        .expect("remote client builds for a valid URL")
}
