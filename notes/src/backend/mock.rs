use async_trait::async_trait;
use chrono::Utc;
use notes_api::{Credentials, Note, NoteDraft, NoteId, Registration};
use notes_auth::{KeyValueStore, TokenStore};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use super::{Backend, CurrentUser};
use crate::error::NotesError;

/// Storage key of the persisted mock note collection.
pub const MOCK_NOTES_KEY: &str = "mock_notes";

/// Token every mock sign-in hands out.
pub const MOCK_TOKEN: &str = "mock-token";

/// Offline backend persisting notes in the shared key-value store. Every call
/// waits `delay` first so callers see realistic asynchronous behavior.
pub struct MockBackend {
    store: Arc<dyn KeyValueStore>,
    tokens: TokenStore,
    delay: Duration,
    /// Serializes every load-modify-save of the collection.
    collection_lock: Mutex<()>,
}

impl MockBackend {
    pub fn new(store: Arc<dyn KeyValueStore>, delay: Duration) -> Self {
        Self {
            tokens: TokenStore::new(store.clone()),
            store,
            delay,
            collection_lock: Mutex::new(()),
        }
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Most recently created first. A missing collection is initialized empty.
    fn load_notes(&self) -> Result<Vec<Note>, NotesError> {
        let Some(raw) = self.store.get(MOCK_NOTES_KEY) else {
            self.store.set(MOCK_NOTES_KEY, "[]");
            return Ok(Vec::new());
        };

        let records: Vec<Value> = serde_json::from_str(&raw)
            .map_err(|e| NotesError::Storage(format!("Corrupt mock notes: {}", e)))?;

        records
            .iter()
            .map(|record| {
                Note::from_value(record)
                    .map_err(|e| NotesError::Storage(format!("Corrupt mock note: {}", e)))
            })
            .collect()
    }

    fn save_notes(&self, notes: &[Note]) -> Result<(), NotesError> {
        let raw = serde_json::to_string(notes)
            .map_err(|e| NotesError::Storage(format!("Failed to encode mock notes: {}", e)))?;
        self.store.set(MOCK_NOTES_KEY, &raw);
        Ok(())
    }

    fn read_notes(&self) -> Result<Vec<Note>, NotesError> {
        let _guard = self.collection_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load_notes()
    }

    /// Run `change` on the collection and persist the result, holding the
    /// collection lock throughout so concurrent writers cannot drop each
    /// other's changes. Nothing is saved when `change` fails.
    fn modify_notes<R, F>(&self, change: F) -> Result<R, NotesError>
    where
        F: FnOnce(&mut Vec<Note>) -> Result<R, NotesError>,
    {
        let _guard = self.collection_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut notes = self.load_notes()?;
        let result = change(&mut notes)?;
        self.save_notes(&notes)?;
        Ok(result)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn register(&self, registration: &Registration) -> Result<Value, NotesError> {
        self.simulate_latency().await;
        Ok(json!({
            "message": "Registered (mock)",
            "user": { "name": registration.name, "email": registration.email },
        }))
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<Value, NotesError> {
        self.simulate_latency().await;
        Ok(json!({ "token": MOCK_TOKEN }))
    }

    async fn current_user(&self) -> Result<CurrentUser, NotesError> {
        self.simulate_latency().await;
        if !self.tokens.has_token() {
            return Err(NotesError::Unauthenticated("Unauthenticated".to_string()));
        }

        Ok(CurrentUser {
            authenticated: true,
            name: Some("Mock User".to_string()),
            email: Some("mock@example.com".to_string()),
            created_at: Some(Utc::now()),
        })
    }

    async fn list_notes(&self) -> Result<Vec<Note>, NotesError> {
        self.simulate_latency().await;
        self.read_notes()
    }

    async fn create_note(&self, note: &NoteDraft) -> Result<Note, NotesError> {
        self.simulate_latency().await;
        let created = Note::new(NoteId::new(Uuid::new_v4().to_string()), note, Utc::now());

        self.modify_notes(|notes| {
            notes.insert(0, created.clone());
            Ok(())
        })?;

        tracing::debug!(id = %created.id, "Created mock note");
        Ok(created)
    }

    async fn update_note(&self, id: &NoteId, note: &NoteDraft) -> Result<Note, NotesError> {
        self.simulate_latency().await;
        self.modify_notes(|notes| {
            let existing = notes
                .iter_mut()
                .find(|existing| &existing.id == id)
                .ok_or(NotesError::NotFound)?;
            existing.apply(note, Utc::now());
            Ok(existing.clone())
        })
    }

    async fn delete_note(&self, id: &NoteId) -> Result<Value, NotesError> {
        self.simulate_latency().await;
        self.modify_notes(|notes| {
            notes.retain(|note| &note.id != id);
            Ok(())
        })?;

        Ok(json!({ "message": "Deleted" }))
    }
}
