use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded token claims: whatever the client signed plus `iat`/`exp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    /// The `email` claim, if present and a string.
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }
}

/// Body returned by `POST /jwt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
