use notes_api::ApiError;
use notes_auth::AuthError;
use thiserror::Error;

/// Every failure surfaced to the front end. `Display` is the message to show.
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Login failed: missing token")]
    MissingToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("Note not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
