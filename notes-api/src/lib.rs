pub mod endpoints;
pub mod envelope;
mod error;
mod macros;
pub mod repositories;

pub use crate::endpoints::{Credentials, Endpoint, Note, NoteDraft, NoteId, Registration};
pub use crate::error::ApiError;
use endpoints::RequestData;
use repositories::*;
use reqwest::header::HeaderMap;
use serde_json::Value;

pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request with the given authentication headers and decode its envelope.
    ///
    /// Non-2xx responses keep their parsed JSON body (if any) so the caller can
    /// pick the message it wants to surface.
    pub async fn send<E>(&self, request: &E, headers: HeaderMap) -> Result<E::Response, ApiError>
    where
        E: Endpoint,
    {
        let method = E::METHOD;
        let url = format!("{}{}", self.base_url, request.endpoint());
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut builder = self.http.request(method, &url).headers(headers);
        if let RequestData::Json(data) = request.data() {
            builder = builder.json(data);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&bytes).ok();
            tracing::debug!(status = %status, url = %url, "Request rejected");
            return Err(ApiError::Status { status, body });
        }

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        E::parse(body)
    }
}

pub struct Request;

impl Request {
    pub fn notes() -> NoteRepository {
        NoteRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }
}
