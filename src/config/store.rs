//! Entitlement store configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Which entitlement store backs the service
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Supabase REST (PostgREST)
    #[default]
    Postgrest,
    /// Direct PostgreSQL via sqlx
    Postgres,
    /// Process memory; development only
    Memory,
}

/// Entitlement store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// PostgREST project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub supabase_url: Option<String>,

    /// Service-role key for PostgREST
    #[serde(default)]
    pub supabase_service_role_key: Option<SecretString>,

    /// PostgreSQL connection URL
    #[serde(default)]
    pub database_url: Option<String>,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Per-call timeout in seconds (HTTP calls and pool acquire)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Run migrations on startup (postgres backend)
    #[serde(default)]
    pub run_migrations: bool,
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate store configuration for the selected backend
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        match self.backend {
            StoreBackend::Postgrest => {
                let url = self
                    .supabase_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or(ValidationError::MissingRequired("STORE__SUPABASE_URL"))?;
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ValidationError::InvalidUrl {
                        field: "STORE__SUPABASE_URL",
                        value: url.to_string(),
                    });
                }
                if *environment == Environment::Production && !url.starts_with("https://") {
                    return Err(ValidationError::MustBeHttps("STORE__SUPABASE_URL"));
                }
                let key_present = self
                    .supabase_service_role_key
                    .as_ref()
                    .is_some_and(|k| !k.expose_secret().is_empty());
                if !key_present {
                    return Err(ValidationError::MissingRequired(
                        "STORE__SUPABASE_SERVICE_ROLE_KEY",
                    ));
                }
            }
            StoreBackend::Postgres => {
                let url = self
                    .database_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or(ValidationError::MissingRequired("STORE__DATABASE_URL"))?;
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(ValidationError::InvalidDatabaseUrl);
                }
            }
            StoreBackend::Memory => {
                if *environment == Environment::Production {
                    return Err(ValidationError::MissingRequired(
                        "STORE__BACKEND (memory is not durable)",
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            supabase_url: None,
            supabase_service_role_key: None,
            database_url: None,
            max_connections: default_max_connections(),
            timeout_secs: default_timeout(),
            run_migrations: false,
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_timeout() -> u64 {
    15
}
