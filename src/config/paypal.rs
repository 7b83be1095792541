//! PayPal configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::paypal::{PayPalConfig as AdapterConfig, PayPalEnvironment};

/// PayPal REST credentials and options
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalConfig {
    pub client_id: String,

    pub client_secret: SecretString,

    /// `sandbox` or `live`
    #[serde(default = "default_env")]
    pub env: String,

    /// Overrides the environment's API URL
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_brand_name")]
    pub brand_name: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Reuse access tokens until shortly before expiry
    #[serde(default)]
    pub cache_access_token: bool,
}

impl PayPalConfig {
    pub fn environment(&self) -> Result<PayPalEnvironment, ValidationError> {
        match self.env.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "" => Ok(PayPalEnvironment::Sandbox),
            "live" | "production" => Ok(PayPalEnvironment::Live),
            other => Err(ValidationError::InvalidPayPalEnvironment(other.to_string())),
        }
    }

    /// Validate PayPal configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.client_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYPAL__CLIENT_ID"));
        }
        if self.client_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYPAL__CLIENT_SECRET"));
        }
        self.environment()?;

        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ValidationError::InvalidUrl {
                    field: "PAYPAL__BASE_URL",
                    value: url.clone(),
                });
            }
            if *environment == Environment::Production && !url.starts_with("https://") {
                return Err(ValidationError::MustBeHttps("PAYPAL__BASE_URL"));
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Worst-case processor time for one capture: token plus capture, twice
    /// when a cached token is refused and the pair is retried.
    pub fn capture_budget(&self) -> Duration {
        let calls = if self.cache_access_token { 4 } else { 2 };
        self.timeout() * calls
    }

    /// Adapter settings for `PayPalAdapter::new`.
    pub fn adapter_config(&self) -> Result<AdapterConfig, ValidationError> {
        let mut config = AdapterConfig::new(self.client_id.clone(), self.client_secret.clone())
            .with_environment(self.environment()?)
            .with_brand_name(self.brand_name.clone())
            .with_timeout(self.timeout())
            .with_token_cache(self.cache_access_token);
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        Ok(config)
    }
}

fn default_env() -> String {
    "sandbox".to_string()
}

fn default_brand_name() -> String {
    "Justice-Bot".to_string()
}

fn default_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PayPalConfig {
        PayPalConfig {
            client_id: "AbC123".to_string(),
            client_secret: SecretString::new("EFg456".to_string()),
            env: default_env(),
            base_url: None,
            brand_name: default_brand_name(),
            timeout_secs: default_timeout(),
            cache_access_token: false,
        }
    }

    #[test]
    fn test_environment_parsing() {
        let mut c = config();
        assert_eq!(c.environment(), Ok(PayPalEnvironment::Sandbox));
        c.env = "LIVE".to_string();
        assert_eq!(c.environment(), Ok(PayPalEnvironment::Live));
        c.env = "staging".to_string();
        assert!(c.environment().is_err());
    }

    #[test]
    fn test_missing_credentials_fail() {
        let mut c = config();
        c.client_id = String::new();
        assert_eq!(
            c.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("PAYPAL__CLIENT_ID"))
        );

        let mut c = config();
        c.client_secret = SecretString::new(" ".to_string());
        assert_eq!(
            c.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("PAYPAL__CLIENT_SECRET"))
        );
    }

    #[test]
    fn test_plain_http_override_rejected_in_production() {
        let mut c = config();
        c.base_url = Some("http://localhost:9000".to_string());
        assert!(c.validate(&Environment::Development).is_ok());
        assert_eq!(
            c.validate(&Environment::Production),
            Err(ValidationError::MustBeHttps("PAYPAL__BASE_URL"))
        );
    }

    #[test]
    fn test_valid_config_builds_adapter_config() {
        let c = config();
        assert!(c.validate(&Environment::Production).is_ok());
        assert!(c.adapter_config().is_ok());
    }
}
