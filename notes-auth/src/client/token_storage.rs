use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use std::sync::Arc;

use crate::client::kv_store::{KeyValueStore, MemoryStore};

/// Storage key of the session token.
pub const TOKEN_KEY: &str = "token";

/// Header the notes endpoints read the session token from.
pub const NOTE_TOKEN_HEADER: &str = "token";

/// Literal the notes backend expects in front of every `token` header value.
pub const NOTE_TOKEN_PREFIX: &str = "3b8ny__";

/// Owns the session token lifecycle. Cloning shares the underlying store.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    pub fn clear_token(&self) {
        self.store.remove(TOKEN_KEY);
    }

    pub fn has_token(&self) -> bool {
        self.get_token().is_some_and(|token| !token.is_empty())
    }

    pub fn build_auth_header(&self) -> AuthHeaders {
        match self.get_token().filter(|token| !token.is_empty()) {
            Some(token) => AuthHeaders::for_token(&token),
            None => AuthHeaders::default(),
        }
    }
}

/// Prefix a raw token for the `token` header. Already-prefixed tokens are
/// returned unchanged.
pub fn prefixed_note_token(raw: &str) -> String {
    if raw.starts_with(NOTE_TOKEN_PREFIX) {
        raw.to_string()
    } else {
        format!("{}{}", NOTE_TOKEN_PREFIX, raw)
    }
}

/// Both header conventions the backend uses: `Authorization: Bearer` for
/// generic calls, the prefixed `token` header for the notes family.
#[derive(Debug, Clone, Default)]
pub struct AuthHeaders {
    bearer: HeaderMap,
    note_token: HeaderMap,
}

impl AuthHeaders {
    fn for_token(token: &str) -> Self {
        let mut headers = Self::default();

        match sensitive_value(&format!("Bearer {}", token)) {
            Some(value) => {
                headers.bearer.insert(AUTHORIZATION, value);
            }
            None => tracing::warn!("Stored token is not a valid header value"),
        }

        if let Some(value) = sensitive_value(&prefixed_note_token(token)) {
            headers
                .note_token
                .insert(HeaderName::from_static(NOTE_TOKEN_HEADER), value);
        }

        headers
    }

    pub fn bearer(&self) -> &HeaderMap {
        &self.bearer
    }

    pub fn note_token(&self) -> &HeaderMap {
        &self.note_token
    }
}

fn sensitive_value(raw: &str) -> Option<HeaderValue> {
    let mut value = HeaderValue::from_str(raw).ok()?;
    value.set_sensitive(true);
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_token_lifecycle() {
        let store = TokenStore::in_memory();
        assert_eq!(store.get_token(), None);
        assert!(!store.has_token());

        store.set_token("first");
        store.set_token("second");
        assert_eq!(store.get_token().as_deref(), Some("second"));
        assert!(store.has_token());

        store.clear_token();
        store.clear_token();
        assert_eq!(store.get_token(), None);
        assert!(!store.has_token());
    }

    #[test]
    fn test_clones_share_storage() {
        let store = TokenStore::in_memory();
        let other = store.clone();
        store.set_token("shared");
        assert_eq!(other.get_token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let store = TokenStore::in_memory();
        store.set_token("");
        assert!(!store.has_token());
        assert!(store.build_auth_header().note_token().is_empty());
    }

    #[test]
    fn test_prefix_is_applied_once() {
        assert_eq!(prefixed_note_token("abc"), "3b8ny__abc");
        assert_eq!(prefixed_note_token("3b8ny__abc"), "3b8ny__abc");
        assert_eq!(
            prefixed_note_token(&prefixed_note_token("abc")),
            prefixed_note_token("abc")
        );
    }

    #[test]
    fn test_build_auth_header_both_conventions() {
        let store = TokenStore::in_memory();
        store.set_token("abc");

        let headers = store.build_auth_header();
        assert_eq!(header(headers.bearer(), "authorization"), Some("Bearer abc"));
        assert_eq!(header(headers.note_token(), "token"), Some("3b8ny__abc"));
        assert!(headers.note_token().get(AUTHORIZATION).is_none());

        // Prefixing happens at header construction only
        assert_eq!(store.get_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_build_auth_header_keeps_existing_prefix() {
        let store = TokenStore::in_memory();
        store.set_token("3b8ny__xyz");

        let first = store.build_auth_header();
        let second = store.build_auth_header();
        assert_eq!(header(first.note_token(), "token"), Some("3b8ny__xyz"));
        assert_eq!(header(second.note_token(), "token"), Some("3b8ny__xyz"));
    }

    #[test]
    fn test_build_auth_header_without_token() {
        let headers = TokenStore::in_memory().build_auth_header();
        assert!(headers.bearer().is_empty());
        assert!(headers.note_token().is_empty());
    }

    #[test]
    fn test_invalid_header_token_is_skipped() {
        let store = TokenStore::in_memory();
        store.set_token("bad\ntoken");
        let headers = store.build_auth_header();
        assert!(headers.bearer().is_empty());
        assert!(headers.note_token().is_empty());
    }
}
