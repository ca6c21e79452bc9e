use super::{Endpoint, RequestData};
use crate::error::ApiError;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Sign-up payload. Profile fields beyond name, email and password (age,
/// phone, ...) are passed through to the backend untouched.
#[derive(Debug, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            profile: Map::new(),
        }
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.profile.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

fn expose<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Debug)]
pub struct SignUp<'a> {
    registration: &'a Registration,
}

impl<'a> SignUp<'a> {
    pub fn new(registration: &'a Registration) -> Self {
        Self { registration }
    }
}

impl Endpoint for SignUp<'_> {
    type Data = Registration;
    /// Account description, exactly as the backend returned it.
    type Response = Value;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/signUp".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self.registration)
    }

    fn parse(body: Value) -> Result<Self::Response, ApiError> {
        Ok(body)
    }
}

#[derive(Debug)]
pub struct SignIn<'a> {
    credentials: &'a Credentials,
}

impl<'a> SignIn<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }
}

impl Endpoint for SignIn<'_> {
    type Data = Credentials;
    /// Raw envelope; the token is located by the caller.
    type Response = Value;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/signIn".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self.credentials)
    }

    fn parse(body: Value) -> Result<Self::Response, ApiError> {
        Ok(body)
    }
}
