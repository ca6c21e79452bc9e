//! Response envelope normalization.
//!
//! The notes backend does not pin down where payloads live inside its JSON
//! responses. Each list below is the full set of shapes this client accepts,
//! tried in order; the first candidate that yields an acceptable value wins.
//! A shape outside these lists is treated as a contract violation by callers.

use serde_json::Value;

/// Path of object keys from the top-level value. The empty path is the value itself.
pub type FieldPath = &'static [&'static str];

/// Where a sign-in response may carry the session token.
pub const TOKEN_FIELDS: &[FieldPath] = &[&["token"], &["accessToken"], &["jwt"], &["data", "token"]];

/// Where a list response may carry the notes array.
pub const NOTE_LIST_FIELDS: &[FieldPath] = &[&["notes"], &["data"], &["items"], &[]];

/// Where a create or update response may carry the note object.
pub const NOTE_FIELDS: &[FieldPath] = &[&["note"], &["data"], &[]];

/// Field names a note identifier may use.
pub const NOTE_ID_FIELDS: &[&str] = &["id", "_id"];

/// Error body fields holding a human-readable message.
pub const ERROR_MESSAGE_FIELDS: &[&str] = &["msg", "message", "error"];

/// Error body fields consulted when a session probe is rejected.
pub const SESSION_ERROR_FIELDS: &[&str] = &["msg", "message"];

pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Evaluate `candidates` in order and return the first one `accept` takes.
pub fn first_match<'a, T, F>(value: &'a Value, candidates: &[FieldPath], accept: F) -> Option<T>
where
    F: Fn(&'a Value) -> Option<T>,
{
    candidates
        .iter()
        .filter_map(|path| lookup(value, path))
        .find_map(accept)
}

pub fn extract_token(value: &Value) -> Option<String> {
    first_match(value, TOKEN_FIELDS, non_empty_str).map(str::to_string)
}

pub fn extract_note_list(value: &Value) -> Option<&Vec<Value>> {
    first_match(value, NOTE_LIST_FIELDS, Value::as_array)
}

pub fn first_string_field(value: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| value.get(*field))
        .find_map(non_empty_str)
        .map(str::to_string)
}

/// Identifier of a note record, accepting either field name. Numeric ids are
/// rendered in decimal.
pub fn note_id(value: &Value) -> Option<String> {
    NOTE_ID_FIELDS
        .iter()
        .filter_map(|field| value.get(*field))
        .find_map(|id| match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}
