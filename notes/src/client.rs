use notes_api::envelope;
use notes_api::{Credentials, Note, NoteDraft, NoteId, Registration};
use notes_auth::{BackendMode, KeyValueStore, Settings, TokenStore};
use serde_json::Value;
use std::sync::Arc;

use crate::backend::{Backend, CurrentUser, MockBackend, RemoteBackend};
use crate::error::NotesError;

/// Entry point for the front end: authentication and notes operations over
/// whichever backend was selected at construction.
pub struct NotesClient {
    backend: Box<dyn Backend>,
    tokens: TokenStore,
    mode: BackendMode,
}

impl NotesClient {
    pub fn new(backend: Box<dyn Backend>, tokens: TokenStore, mode: BackendMode) -> Self {
        Self {
            backend,
            tokens,
            mode,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, NotesError> {
        let store = settings.open_store()?;
        Self::with_store(settings, store)
    }

    /// Build a client on an existing store. The backend mode is read from
    /// `settings` once, here.
    pub fn with_store(
        settings: &Settings,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, NotesError> {
        let tokens = TokenStore::new(store.clone());
        let mode = settings.backend_mode();

        let backend: Box<dyn Backend> = match &mode {
            BackendMode::Mock => Box::new(MockBackend::new(store, settings.mock_delay())),
            BackendMode::Remote { base_url } => {
                Box::new(RemoteBackend::new(base_url, tokens.clone())?)
            }
        };

        tracing::info!(mode = ?mode, "Notes client initialized");
        Ok(Self::new(backend, tokens, mode))
    }

    pub fn mode(&self) -> &BackendMode {
        &self.mode
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, registration: &Registration) -> Result<Value, NotesError> {
        self.backend.register(registration).await
    }

    /// Sign in, store the returned token and confirm the backend accepts it.
    ///
    /// The backend can hand out a token on sign-in and then reject it on every
    /// protected call, so a token only counts once the session check passes.
    /// On a failed check the token is removed again and the login reports
    /// invalid credentials.
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, NotesError> {
        let response = self.backend.sign_in(credentials).await?;

        let token = envelope::extract_token(&response).ok_or_else(|| {
            tracing::warn!("Sign-in response carried no recognized token field");
            NotesError::MissingToken
        })?;
        self.tokens.set_token(&token);

        if let Err(e) = self.backend.current_user().await {
            tracing::warn!("Session check rejected the new token: {}", e);
            self.tokens.clear_token();
            return Err(NotesError::InvalidCredentials);
        }

        tracing::info!(email = %credentials.email, "Logged in");
        Ok(response)
    }

    /// Forget the local token. No server call is made.
    pub fn logout(&self) {
        self.tokens.clear_token();
        tracing::info!("Logged out");
    }

    /// Token presence only. Use [`NotesClient::current_user`] for a real check.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.has_token()
    }

    pub async fn current_user(&self) -> Result<CurrentUser, NotesError> {
        self.backend.current_user().await
    }

    /// Guard for protected screens: re-validates the stored token and forgets
    /// it when the backend rejects it. Transport failures leave the token in
    /// place.
    pub async fn require_session(&self) -> Result<CurrentUser, NotesError> {
        if !self.tokens.has_token() {
            return Err(NotesError::Unauthenticated("Unauthenticated".to_string()));
        }

        match self.backend.current_user().await {
            Err(NotesError::Unauthenticated(msg)) => {
                tracing::info!("Stored token rejected, clearing session: {}", msg);
                self.tokens.clear_token();
                Err(NotesError::Unauthenticated(msg))
            }
            result => result,
        }
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, NotesError> {
        self.backend.list_notes().await
    }

    pub async fn create_note(&self, note: &NoteDraft) -> Result<Note, NotesError> {
        self.backend.create_note(note).await
    }

    pub async fn update_note(&self, id: &NoteId, note: &NoteDraft) -> Result<Note, NotesError> {
        self.backend.update_note(id, note).await
    }

    pub async fn delete_note(&self, id: &NoteId) -> Result<Value, NotesError> {
        self.backend.delete_note(id).await
    }
}
