//! Session validation port for bearer token verification.
//!
//! HTTP middleware hands the raw token (without the `Bearer ` prefix) to a
//! `SessionValidator` and receives the caller's `IdentityContext`.
//!
//! # Requirements
//!
//! Implementations MUST verify:
//! - **Signature**: with the configured key, using only the expected algorithm
//! - **Expiry (exp)**: token must not be expired
//! - **Subject (sub)**: must be present and non-empty

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, IdentityContext};

/// Validates bearer tokens and extracts the caller identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens, bad signatures, or an
///   unexpected algorithm
/// - `AuthError::TokenExpired` for expired tokens
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token and return the identity it carries.
    async fn validate(&self, token: &str) -> Result<IdentityContext, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, IdentityContext>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, identity: IdentityContext) {
            self.tokens.write().unwrap().insert(token.to_string(), identity);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<IdentityContext, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn session_validator_returns_identity_for_valid_token() {
        let validator = TestSessionValidator::new();
        validator.add_valid_token(
            "valid-token-123",
            IdentityContext::new(UserId::new("user-123").unwrap(), "test@example.com"),
        );

        let identity = validator.validate("valid-token-123").await.unwrap();

        assert_eq!(identity.subject_id.as_str(), "user-123");
        assert_eq!(identity.email, "test@example.com");
    }

    #[tokio::test]
    async fn session_validator_returns_error_for_unknown_token() {
        let validator = TestSessionValidator::new();
        let result = validator.validate("invalid-token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
