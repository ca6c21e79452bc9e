pub mod executor;
pub mod handlers;

pub use executor::execute_command;
pub use handlers::parse_args;

use notes_api::{NoteDraft, NoteId};
use serde_json::{Map, Value};

/// One front-end action, mapped 1:1 onto a `NotesClient` operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Register {
        name: String,
        email: String,
        password: String,
        profile: Map<String, Value>,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    WhoAmI,
    ListNotes,
    CreateNote(NoteDraft),
    UpdateNote {
        id: NoteId,
        note: NoteDraft,
    },
    DeleteNote(NoteId),
}
