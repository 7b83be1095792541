//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Minimum HS256 key length (RFC 7518 §3.2).
const MIN_SECRET_BYTES: usize = 32;

/// Authentication configuration (identity provider shared secret)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret of the identity provider
    pub jwt_secret: SecretString,

    /// Expected `aud` claim; unchecked when absent
    #[serde(default)]
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}
