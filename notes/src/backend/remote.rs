use async_trait::async_trait;
use notes_api::{ApiError, Client, Credentials, Note, NoteDraft, NoteId, Registration, Request};
use notes_auth::TokenStore;
use reqwest::header::HeaderMap;
use serde_json::Value;

use super::{Backend, CurrentUser};
use crate::error::NotesError;

/// Talks to the notes REST service. Notes calls authenticate with the prefixed
/// `token` header only; the service ignores `Authorization` on that family.
pub struct RemoteBackend {
    client: Client,
    tokens: TokenStore,
}

impl RemoteBackend {
    pub fn new(base_url: &str, tokens: TokenStore) -> Result<Self, NotesError> {
        Ok(Self {
            client: Client::new(base_url)?,
            tokens,
        })
    }

    fn note_headers(&self) -> HeaderMap {
        self.tokens.build_auth_header().note_token().clone()
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    async fn register(&self, registration: &Registration) -> Result<Value, NotesError> {
        tracing::debug!(email = %registration.email, "Registering account");
        let request = Request::users().sign_up(registration);
        Ok(self.client.send(&request, HeaderMap::new()).await?)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Value, NotesError> {
        tracing::debug!(email = %credentials.email, "Signing in");
        let request = Request::users().sign_in(credentials);
        Ok(self.client.send(&request, HeaderMap::new()).await?)
    }

    // No "who am I" endpoint exists; a protected read stands in for one.
    async fn current_user(&self) -> Result<CurrentUser, NotesError> {
        let request = Request::notes().probe();
        match self.client.send(&request, self.note_headers()).await {
            // Any 2xx proves the session, readable body or not
            Ok(()) | Err(ApiError::Decode(_)) => Ok(CurrentUser::authenticated()),
            Err(e @ ApiError::Status { .. }) => {
                Err(NotesError::Unauthenticated(e.session_message()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_notes(&self) -> Result<Vec<Note>, NotesError> {
        let request = Request::notes().list();
        Ok(self.client.send(&request, self.note_headers()).await?)
    }

    async fn create_note(&self, note: &NoteDraft) -> Result<Note, NotesError> {
        let request = Request::notes().create(note.clone());
        Ok(self.client.send(&request, self.note_headers()).await?)
    }

    async fn update_note(&self, id: &NoteId, note: &NoteDraft) -> Result<Note, NotesError> {
        let request = Request::notes().update(id.clone(), note.clone());
        Ok(self.client.send(&request, self.note_headers()).await?)
    }

    async fn delete_note(&self, id: &NoteId) -> Result<Value, NotesError> {
        let request = Request::notes().delete(id.clone());
        Ok(self.client.send(&request, self.note_headers()).await?)
    }
}
