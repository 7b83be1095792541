//! HS256 shared-secret validator for identity-provider tokens.
//!
//! The identity provider (Supabase) signs access tokens with a project secret
//! using HS256. This adapter implements the `SessionValidator` port by:
//!
//! 1. Verifying the signature with the shared secret
//! 2. Accepting HS256 only, so a token cannot choose its own algorithm
//! 3. Checking expiry with zero leeway
//! 4. Optionally checking the audience claim
//! 5. Mapping `sub` and `email` to an `IdentityContext`
//!
//! # Example
//!
//! ```ignore
//! let config = SharedSecretConfig::new(SecretString::new(secret))
//!     .with_audience("authenticated");
//! let validator = SharedSecretValidator::new(config);
//! let identity = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, IdentityContext, UserId};
use crate::ports::SessionValidator;

/// Configuration for the shared-secret validator.
#[derive(Clone)]
pub struct SharedSecretConfig {
    /// HMAC secret shared with the identity provider.
    pub secret: SecretString,

    /// Expected `aud` claim. Not checked when `None`.
    pub audience: Option<String>,
}

impl SharedSecretConfig {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            audience: None,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

/// Claims read from the token. Anything else in the payload is ignored.
#[derive(Debug, Deserialize)]
struct IdentityClaims {
    sub: String,

    #[serde(default)]
    email: Option<String>,
}

/// HS256 session validator.
pub struct SharedSecretValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    audience: Option<String>,
}

impl SharedSecretValidator {
    pub fn new(config: SharedSecretConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        match &config.audience {
            Some(aud) => validation.set_audience(&[aud.as_str()]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
            audience: config.audience,
        }
    }
}

#[async_trait]
impl SessionValidator for SharedSecretValidator {
    async fn validate(&self, token: &str) -> Result<IdentityContext, AuthError> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidAlgorithm => {
                        tracing::warn!("Token signed with unexpected algorithm");
                        AuthError::InvalidToken
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            },
        )?;

        let claims = data.claims;
        let subject_id = UserId::new(claims.sub).map_err(|_| {
            tracing::warn!("Token has empty subject");
            AuthError::InvalidToken
        })?;

        Ok(IdentityContext::new(subject_id, claims.email.unwrap_or_default()))
    }
}

impl std::fmt::Debug for SharedSecretValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretValidator")
            .field("algorithm", &"HS256")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn validator() -> SharedSecretValidator {
        SharedSecretValidator::new(SharedSecretConfig::new(SecretString::new(SECRET.to_string())))
    }

    fn token_with(alg: Algorithm, secret: &str, claims: serde_json::Value) -> String {
        encode(&Header::new(alg), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn good_claims() -> serde_json::Value {
        json!({
            "sub": "2f1c0a52-6a3b-4f0e-9d43-5b5f1c3b9a11",
            "email": "tenant@example.com",
            "aud": "authenticated",
            "role": "authenticated",
            "exp": now() + 3600
        })
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Accepted Tokens
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_yields_identity() {
        let token = token_with(Algorithm::HS256, SECRET, good_claims());

        let identity = validator().validate(&token).await.unwrap();

        assert_eq!(identity.subject_id.as_str(), "2f1c0a52-6a3b-4f0e-9d43-5b5f1c3b9a11");
        assert_eq!(identity.email, "tenant@example.com");
    }

    #[tokio::test]
    async fn missing_email_is_empty_string() {
        let token = token_with(
            Algorithm::HS256,
            SECRET,
            json!({ "sub": "user-1", "exp": now() + 60 }),
        );

        let identity = validator().validate(&token).await.unwrap();
        assert_eq!(identity.email, "");
    }

    #[tokio::test]
    async fn matching_audience_is_accepted() {
        let validator = SharedSecretValidator::new(
            SharedSecretConfig::new(SecretString::new(SECRET.to_string()))
                .with_audience("authenticated"),
        );
        let token = token_with(Algorithm::HS256, SECRET, good_claims());

        assert!(validator.validate(&token).await.is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejected Tokens
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let token = token_with(Algorithm::HS256, "another-secret-of-sufficient-length!!", good_claims());
        assert_eq!(validator().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn other_hmac_algorithm_is_rejected() {
        let token = token_with(Algorithm::HS384, SECRET, good_claims());
        assert_eq!(validator().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let mut claims = good_claims();
        claims["exp"] = json!(now() - 5);
        let token = token_with(Algorithm::HS256, SECRET, claims);

        assert_eq!(validator().validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn truncated_signature_is_rejected() {
        let token = token_with(Algorithm::HS256, SECRET, good_claims());
        let truncated = &token[..token.len() - 4];

        assert_eq!(validator().validate(truncated).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        assert_eq!(validator().validate("not-a-jwt").await, Err(AuthError::InvalidToken));
        assert_eq!(validator().validate("").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn unsigned_token_is_rejected() {
        // header {"alg":"none","typ":"JWT"}, payload {"sub":"x","exp":9999999999}
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJzdWIiOiJ4IiwiZXhwIjo5OTk5OTk5OTk5fQ.";
        assert_eq!(validator().validate(token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn missing_exp_is_rejected() {
        let token = token_with(Algorithm::HS256, SECRET, json!({ "sub": "user-1" }));
        assert_eq!(validator().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn empty_subject_is_rejected() {
        let token = token_with(Algorithm::HS256, SECRET, json!({ "sub": "", "exp": now() + 60 }));
        assert_eq!(validator().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected_when_configured() {
        let validator = SharedSecretValidator::new(
            SharedSecretConfig::new(SecretString::new(SECRET.to_string()))
                .with_audience("service_role"),
        );
        let token = token_with(Algorithm::HS256, SECRET, good_claims());

        assert_eq!(validator.validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", validator());
        assert!(!rendered.contains(SECRET));
    }
}
