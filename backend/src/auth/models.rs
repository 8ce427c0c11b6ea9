//! Data structures for authentication-related entities.
//!
//! The identity carried in a session is whatever JSON object the client
//! posted to `/jwt`; only its `email` claim is ever read back, for ownership
//! checks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the cookie holding the signed session token.
pub const SESSION_COOKIE: &str = "token";

/// Signed token payload: the caller's identity plus issue and expiry times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Map<String, Value>,
    pub iat: u64,
    pub exp: u64,
}

/// Decoded session attached to requests that passed `require_session`.
#[derive(Debug, Clone)]
pub struct Session {
    claims: Claims,
}

impl Session {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn email(&self) -> Option<&str> {
        self.claims.identity.get("email").and_then(Value::as_str)
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
}

impl SessionResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
