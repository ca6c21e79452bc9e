pub mod backend;
mod client;
pub mod commands;
mod error;
pub mod logging;

pub use backend::{Backend, CurrentUser};
pub use client::NotesClient;
pub use error::NotesError;

// Always expose testing module (integration tests need it)
pub mod testing;
