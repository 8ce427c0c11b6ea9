//! Core business logic for the authentication system.
//!
//! Signs and verifies HS256 session tokens with the server secret and builds
//! the cookies that carry them. There is no user store: whatever identity the
//! caller presents is signed as-is.

use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use super::errors::AuthError;
use super::models::{Claims, Session, SESSION_COOKIE};

/// Lifetime of an issued session token.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Identities are signed as posted, so an `aud` key may be present.
        validation.validate_aud = false;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: SESSION_TTL,
        }
    }

    /// Signs `identity` into a token expiring one TTL from now.
    pub fn issue(&self, identity: Map<String, Value>) -> Result<String, AuthError> {
        self.issue_at(identity, get_current_timestamp())
    }

    /// Caller-supplied `iat`/`exp` keys are dropped; the server sets both.
    pub fn issue_at(&self, mut identity: Map<String, Value>, now: u64) -> Result<String, AuthError> {
        identity.remove("iat");
        identity.remove("exp");
        let claims = Claims {
            identity,
            iat: now,
            exp: now + self.ttl.as_secs(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(AuthError::Signing)
    }

    /// Checks signature and expiry, returning the decoded session.
    pub fn verify(&self, token: &str) -> Result<Session, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| Session::new(data.claims))
            .map_err(AuthError::InvalidToken)
    }
}

/// HttpOnly, Secure, SameSite=None cookie carrying a freshly issued token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

/// Expired copy of the session cookie, emitted on logout whether or not the
/// request carried one.
pub fn cleared_cookie() -> Cookie<'static> {
    let mut cookie = session_cookie(String::new());
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("identity must be an object"),
        }
    }

    #[test]
    fn issued_tokens_verify_and_keep_identity() {
        let keys = SessionKeys::new(b"secret");
        let token = keys.issue(identity(json!({ "email": "a@x.com", "name": "A" }))).unwrap();
        let session = keys.verify(&token).unwrap();
        assert_eq!(session.email(), Some("a@x.com"));
        assert_eq!(session.claims().identity.get("name"), Some(&json!("A")));
        assert_eq!(session.claims().exp - session.claims().iat, 3600);
    }

    #[test]
    fn caller_cannot_choose_expiry() {
        let keys = SessionKeys::new(b"secret");
        let token = keys
            .issue(identity(json!({ "email": "a@x.com", "exp": 99_999_999_999u64 })))
            .unwrap();
        let session = keys.verify(&token).unwrap();
        assert!(session.claims().exp <= get_current_timestamp() + 3600);
        assert!(!session.claims().identity.contains_key("exp"));
    }

    #[test]
    fn identity_with_audience_still_verifies() {
        let keys = SessionKeys::new(b"secret");
        let token = keys.issue(identity(json!({ "email": "a@x.com", "aud": "web" }))).unwrap();
        let session = keys.verify(&token).unwrap();
        assert_eq!(session.email(), Some("a@x.com"));
        assert_eq!(session.claims().identity.get("aud"), Some(&json!("web")));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let keys = SessionKeys::new(b"secret");
        let token = keys
            .issue_at(identity(json!({ "email": "a@x.com" })), get_current_timestamp() - 2 * 3600)
            .unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let token = SessionKeys::new(b"other").issue(Map::new()).unwrap();
        assert!(SessionKeys::new(b"secret").verify(&token).is_err());
        assert!(SessionKeys::new(b"secret").verify("not.a.token").is_err());
    }

    #[test]
    fn cookies_are_locked_down() {
        let cookie = session_cookie("abc".into());
        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));

        let cleared = cleared_cookie();
        assert_eq!(cleared.value(), "");
        assert!(cleared.max_age().map_or(false, |age| age.is_zero()));
    }
}
