use crate::endpoints::{
    Credentials, NoteDraft, NoteId, Registration,
    notes::{CreateNote, DeleteNote, ListNotes, SessionProbe, UpdateNote},
    users::{SignIn, SignUp},
};

pub struct NoteRepository;

impl NoteRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListNotes {
        ListNotes
    }

    pub fn probe(&self) -> SessionProbe {
        SessionProbe
    }

    pub fn create(&self, note: NoteDraft) -> CreateNote {
        CreateNote::new(note)
    }

    pub fn update(&self, id: NoteId, note: NoteDraft) -> UpdateNote {
        UpdateNote::new(id, note)
    }

    pub fn delete(&self, id: NoteId) -> DeleteNote {
        DeleteNote::new(id)
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn sign_up<'a>(&self, registration: &'a Registration) -> SignUp<'a> {
        SignUp::new(registration)
    }

    pub fn sign_in<'a>(&self, credentials: &'a Credentials) -> SignIn<'a> {
        SignIn::new(credentials)
    }
}
