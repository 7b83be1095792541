//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `PLAIN_JUSTICE` prefix
//! and nested values are separated with `__`.
//!
//! # Example
//!
//! ```no_run
//! use plain_justice::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod assets;
mod auth;
mod error;
mod journey;
mod paypal;
mod server;
mod store;

pub use assets::AssetsConfig;
pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use journey::JourneyConfig;
pub use paypal::PayPalConfig;
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Bearer token verification
    pub auth: AuthConfig,

    /// PayPal credentials
    pub paypal: PayPalConfig,

    /// Entitlement store backend
    #[serde(default)]
    pub store: StoreConfig,

    /// Document directory and slug bindings
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Procedures data file
    #[serde(default)]
    pub journey: JourneyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PLAIN_JUSTICE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PLAIN_JUSTICE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PLAIN_JUSTICE__PAYPAL__CLIENT_ID=...` -> `paypal.client_id = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PLAIN_JUSTICE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;
        self.server.validate()?;
        self.auth.validate()?;
        self.paypal.validate(environment)?;
        self.store.validate(environment)?;
        self.assets.validate()?;
        self.journey.validate()?;
        self.server
            .validate_outbound_budget(self.paypal.capture_budget() + self.store.timeout())?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
