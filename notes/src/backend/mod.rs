mod mock;
mod remote;

pub use mock::{MockBackend, MOCK_NOTES_KEY, MOCK_TOKEN};
pub use remote::RemoteBackend;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notes_api::{Credentials, Note, NoteDraft, NoteId, Registration};
use serde_json::Value;

use crate::error::NotesError;

/// Outcome of a successful session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub authenticated: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CurrentUser {
    /// Marker for a backend that can confirm a session but not describe the user.
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            name: None,
            email: None,
            created_at: None,
        }
    }
}

/// Capability set shared by the mock and remote backends.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<Value, NotesError>;

    /// Raw sign-in envelope. Locating and storing the token is the caller's job.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Value, NotesError>;

    /// Confirm the stored token is accepted.
    async fn current_user(&self) -> Result<CurrentUser, NotesError>;

    async fn list_notes(&self) -> Result<Vec<Note>, NotesError>;

    async fn create_note(&self, note: &NoteDraft) -> Result<Note, NotesError>;

    async fn update_note(&self, id: &NoteId, note: &NoteDraft) -> Result<Note, NotesError>;

    async fn delete_note(&self, id: &NoteId) -> Result<Value, NotesError>;
}
