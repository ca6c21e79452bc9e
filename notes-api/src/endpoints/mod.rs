pub mod notes;
pub mod users;

pub use users::{Credentials, Registration};

use crate::envelope::{self, NOTE_FIELDS};
use crate::error::ApiError;
use crate::macros::setter;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Display;

/// A single call against the notes backend.
pub trait Endpoint {
    type Data: Serialize;
    type Response;

    const METHOD: Method = Method::GET;

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }

    /// Unwrap the payload from a successful response envelope.
    fn parse(body: Value) -> Result<Self::Response, ApiError>;
}

pub enum RequestData<T> {
    Empty,
    Json(T),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for NoteId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NoteId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Fresh note with both timestamps set to `now`.
    pub fn new(id: NoteId, draft: &NoteDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.clone().unwrap_or_default(),
            content: draft.content.clone().unwrap_or_default(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Overwrite the supplied fields and refresh `updated_at`. Identifier and
    /// creation time are never touched.
    pub fn apply(&mut self, draft: &NoteDraft, now: DateTime<Utc>) {
        if let Some(title) = &draft.title {
            self.title = title.clone();
        }
        if let Some(content) = &draft.content {
            self.content = content.clone();
        }
        self.updated_at = Some(now);
    }

    /// Decode a note record whose identifier may live under either `id` or `_id`.
    pub fn from_value(value: &Value) -> Result<Self, ApiError> {
        if !value.is_object() {
            return Err(ApiError::Contract("note is not a JSON object".to_string()));
        }
        let id = envelope::note_id(value)
            .ok_or_else(|| ApiError::Contract("note has no identifier".to_string()))?;

        Ok(Self {
            id: NoteId(id),
            title: string_field(value, "title"),
            content: string_field(value, "content"),
            created_at: timestamp_field(value, "createdAt"),
            updated_at: timestamp_field(value, "updatedAt"),
        })
    }

    /// Unwrap a single note from a create or update response.
    pub fn from_envelope(body: &Value) -> Result<Self, ApiError> {
        envelope::first_match(body, NOTE_FIELDS, |candidate| {
            Note::from_value(candidate).ok()
        })
        .ok_or_else(|| ApiError::Contract("response does not contain a note".to_string()))
    }
}

fn string_field(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn timestamp_field(value: &Value, field: &str) -> Option<DateTime<Utc>> {
    let raw = value.get(field)?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
}

/// Fields to write on create or update. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NoteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt title: String);
    setter!(opt content: String);
}
