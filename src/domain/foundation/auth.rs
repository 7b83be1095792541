//! Authentication types for the domain layer.
//!
//! `IdentityContext` is what the rest of the system knows about a caller once
//! their bearer token has been verified. It lives for one request and is
//! handed explicitly to whatever needs it; it is never persisted.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token verification:
//! let identity = IdentityContext::new(UserId::new("a1b2...")?, "user@example.com");
//! request.extensions_mut().insert(identity);
//! ```

use super::UserId;
use thiserror::Error;

/// Verified caller identity extracted from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    /// Stable subject identifier (`sub` claim).
    pub subject_id: UserId,

    /// Contact email (`email` claim). May be empty if the provider omits it.
    pub email: String,
}

impl IdentityContext {
    /// Creates a new identity context.
    pub fn new(subject_id: UserId, email: impl Into<String>) -> Self {
        Self {
            subject_id,
            email: email.into(),
        }
    }
}

/// Authentication errors that can occur during token validation.
///
/// Every variant maps to 401 at the HTTP boundary; the split exists for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header, or it is not `Bearer <token>`.
    #[error("Missing bearer token")]
    MissingCredentials,

    /// Malformed token, bad signature, or unexpected algorithm.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Signature is valid but `exp` has passed.
    #[error("Token expired")]
    TokenExpired,
}

impl AuthError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "MISSING_TOKEN",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
        }
    }
}
