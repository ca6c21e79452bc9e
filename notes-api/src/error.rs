use reqwest::StatusCode;
use serde_json::Value;

use crate::envelope::{self, ERROR_MESSAGE_FIELDS, SESSION_ERROR_FIELDS};

const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";
const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated";

#[derive(Debug)]
pub enum ApiError {
    /// No response at all (connectivity, DNS, TLS).
    Transport(reqwest::Error),
    /// Non-2xx status; `body` is the response parsed as JSON, if it was JSON.
    Status {
        status: StatusCode,
        body: Option<Value>,
    },
    /// Success status but the body is not JSON.
    Decode(serde_json::Error),
    /// Success status but the body cannot supply a required field.
    Contract(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best human-readable message for a failed request.
    ///
    /// Known error fields first, then the whole JSON body, then the reason phrase.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { status, body } => body
                .as_ref()
                .and_then(|body| envelope::first_string_field(body, ERROR_MESSAGE_FIELDS))
                .or_else(|| body.as_ref().map(Value::to_string))
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            e => e.to_string(),
        }
    }

    /// Message used when a session probe fails.
    pub fn session_message(&self) -> String {
        match self {
            ApiError::Status { status, body } => body
                .as_ref()
                .and_then(|body| envelope::first_string_field(body, SESSION_ERROR_FIELDS))
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| UNAUTHENTICATED_MESSAGE.to_string()),
            e => e.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Transport(value)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Decode(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Network error: {}", e),
            ApiError::Status { .. } => f.write_str(&self.message()),
            ApiError::Decode(e) => write!(f, "Invalid response body: {}", e),
            ApiError::Contract(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            ApiError::Decode(e) => Some(e),
            _ => None,
        }
    }
}
