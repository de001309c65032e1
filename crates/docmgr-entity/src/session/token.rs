//! Bearer credential and the token endpoint payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

use docmgr_core::error::AppError;
use docmgr_core::result::AppResult;

/// Opaque bearer token proving an authenticated session.
///
/// Always non-empty: an empty token is not a credential.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token. Empty or whitespace-only tokens are rejected.
    pub fn new(token: impl Into<String>) -> AppResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(AppError::validation("Credential token must not be empty"));
        }
        Ok(Self(token))
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header for this credential.
    pub fn authorization_value(&self) -> String {
        format!("Token {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Body of `POST /auth-token/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Successful response of `POST /auth-token/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenResponse {
    /// Issued token.
    pub token: String,
}
