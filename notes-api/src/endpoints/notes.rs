use super::{Endpoint, Note, NoteDraft, NoteId, RequestData};
use crate::envelope;
use crate::error::ApiError;
use crate::macros::setter;
use reqwest::Method;
use serde_json::Value;
use std::borrow::Cow;

#[derive(Debug, Clone, Default)]
pub struct ListNotes;

impl Endpoint for ListNotes {
    type Data = ();
    type Response = Vec<Note>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/notes".into()
    }

    fn parse(body: Value) -> Result<Self::Response, ApiError> {
        match envelope::extract_note_list(&body) {
            Some(notes) => notes.iter().map(Note::from_value).collect(),
            None => {
                tracing::warn!("Unrecognized notes list envelope, treating as empty");
                Ok(Vec::new())
            }
        }
    }
}

/// `GET /notes` used only to prove the session token is accepted. The payload
/// is discarded.
#[derive(Debug, Clone, Default)]
pub struct SessionProbe;

impl Endpoint for SessionProbe {
    type Data = ();
    type Response = ();

    fn endpoint(&self) -> Cow<'_, str> {
        "/notes".into()
    }

    fn parse(_body: Value) -> Result<Self::Response, ApiError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CreateNote {
    note: NoteDraft,
}

impl CreateNote {
    pub fn new(note: NoteDraft) -> Self {
        Self { note }
    }

    setter!(opt note.title: String);
    setter!(opt note.content: String);
}

impl Endpoint for CreateNote {
    type Data = NoteDraft;
    type Response = Note;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/notes".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.note)
    }

    fn parse(body: Value) -> Result<Self::Response, ApiError> {
        Note::from_envelope(&body)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateNote {
    id: NoteId,
    note: NoteDraft,
}

impl UpdateNote {
    pub fn new(id: NoteId, note: NoteDraft) -> Self {
        Self { id, note }
    }

    setter!(opt note.title: String);
    setter!(opt note.content: String);
}

impl Endpoint for UpdateNote {
    type Data = NoteDraft;
    type Response = Note;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        note_path(&self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.note)
    }

    fn parse(body: Value) -> Result<Self::Response, ApiError> {
        Note::from_envelope(&body)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteNote {
    id: NoteId,
}

impl DeleteNote {
    pub fn new(id: NoteId) -> Self {
        Self { id }
    }
}

impl Endpoint for DeleteNote {
    type Data = ();
    /// Whatever confirmation body the backend sends.
    type Response = Value;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        note_path(&self.id).into()
    }

    fn parse(body: Value) -> Result<Self::Response, ApiError> {
        Ok(body)
    }
}

/// Item path with the id encoded as a single path segment.
fn note_path(id: &NoteId) -> String {
    format!("/notes/{}", urlencoding::encode(id.as_str()))
}
