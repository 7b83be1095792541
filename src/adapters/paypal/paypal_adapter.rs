//! PayPal Orders v2 adapter.
//!
//! Implements the `PaymentProcessor` port against PayPal's REST API:
//! - OAuth2 client-credentials exchange (`/v1/oauth2/token`)
//! - Order creation (`/v2/checkout/orders`)
//! - Order capture (`/v2/checkout/orders/{id}/capture`)
//!
//! By default a fresh access token is fetched for every call. With
//! `cache_access_token` enabled the token is kept until shortly before it
//! expires; a 401 evicts it and the request is sent once more with a new token.
//! PayPal does not execute a request it answers with 401, so the resend cannot
//! double-capture.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PayPalConfig::new("client-id", SecretString::new(secret))
//!     .with_environment(PayPalEnvironment::Live);
//! let adapter = PayPalAdapter::new(config)?;
//! ```

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::foundation::OrderId;
use crate::domain::purchase::CaptureResponse;
use crate::ports::{OrderRequest, PaymentError, PaymentProcessor};

use super::types::{CreateOrderBody, TokenResponse};

/// Tokens are dropped this long before PayPal says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token response carries no `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(300);

/// PayPal deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayPalEnvironment {
    #[default]
    Sandbox,
    Live,
}

impl PayPalEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            PayPalEnvironment::Sandbox => "https://api-m.sandbox.paypal.com",
            PayPalEnvironment::Live => "https://api-m.paypal.com",
        }
    }
}

/// PayPal API configuration.
#[derive(Clone)]
pub struct PayPalConfig {
    client_id: String,
    client_secret: SecretString,
    environment: PayPalEnvironment,

    /// Overrides the environment URL (tests, proxies).
    base_url: Option<String>,

    brand_name: String,
    timeout: Duration,
    cache_access_token: bool,
}

impl PayPalConfig {
    pub fn new(client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            environment: PayPalEnvironment::default(),
            base_url: None,
            brand_name: "Justice-Bot".to_string(),
            timeout: Duration::from_secs(15),
            cache_access_token: false,
        }
    }

    pub fn with_environment(mut self, environment: PayPalEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_brand_name(mut self, brand_name: impl Into<String>) -> Self {
        self.brand_name = brand_name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token_cache(mut self, enabled: bool) -> Self {
        self.cache_access_token = enabled;
        self
    }

    fn api_base(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// PayPal payment processor adapter.
pub struct PayPalAdapter {
    config: PayPalConfig,
    http_client: reqwest::Client,
    token_cache: RwLock<Option<CachedToken>>,
}

impl PayPalAdapter {
    /// Create a new adapter. Fails only if the HTTP client cannot be built.
    pub fn new(config: PayPalConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            token_cache: RwLock::new(None),
        })
    }

    /// Exchange client credentials for an access token.
    async fn fetch_token(&self) -> Result<CachedToken, PaymentError> {
        if self.config.client_id.trim().is_empty()
            || self.config.client_secret.expose_secret().trim().is_empty()
        {
            return Err(PaymentError::configuration("PayPal client credentials are not set"));
        }

        let url = format!("{}/v1/oauth2/token", self.config.api_base());
        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(self.config.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "PayPal token exchange failed");
            return Err(PaymentError::authentication(format!(
                "token exchange returned {}",
                status.as_u16()
            ))
            .with_response(status.as_u16(), body));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::decode(format!("token response: {}", e)))?;

        let lifetime = token
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME)
            .saturating_sub(TOKEN_EXPIRY_MARGIN);

        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    /// Returns a usable access token, from cache when enabled and fresh.
    async fn access_token(&self) -> Result<String, PaymentError> {
        if !self.config.cache_access_token {
            return Ok(self.fetch_token().await?.value);
        }

        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref().filter(|c| c.is_fresh()) {
                return Ok(cached.value.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *self.token_cache.write().await = Some(fresh);
        Ok(value)
    }

    async fn evict_token(&self) {
        *self.token_cache.write().await = None;
    }

    /// Sends an authorized request. With the token cache on, a 401 evicts the
    /// token and the request is sent exactly once more.
    async fn send_authorized<F>(&self, build: F) -> Result<Response, PaymentError>
    where
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        let token = self.access_token().await?;
        let response = build(&token).send().await.map_err(transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED && self.config.cache_access_token {
            tracing::info!("PayPal rejected cached token, refreshing once");
            self.evict_token().await;
            let token = self.access_token().await?;
            return build(&token).send().await.map_err(transport_error);
        }

        Ok(response)
    }
}

fn transport_error(e: reqwest::Error) -> PaymentError {
    if e.is_timeout() {
        PaymentError::network(format!("PayPal request timed out: {}", e))
    } else {
        PaymentError::network(format!("PayPal request failed: {}", e))
    }
}

#[async_trait]
impl PaymentProcessor for PayPalAdapter {
    async fn create_order(&self, request: &OrderRequest) -> Result<Value, PaymentError> {
        let url = format!("{}/v2/checkout/orders", self.config.api_base());
        let body = CreateOrderBody::for_request(request, &self.config.brand_name);

        let response = self
            .send_authorized(|token| self.http_client.post(&url).bearer_auth(token).json(&body))
            .await?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(PaymentError::upstream_status(status.as_u16(), text));
        }

        serde_json::from_str(&text).map_err(|e| {
            PaymentError::decode(format!("order response: {}", e)).with_response(status.as_u16(), text.clone())
        })
    }

    async fn capture_order(&self, order_id: &OrderId) -> Result<CaptureResponse, PaymentError> {
        let url = format!(
            "{}/v2/checkout/orders/{}/capture",
            self.config.api_base(),
            order_id
        );

        let response = self
            .send_authorized(|token| {
                self.http_client
                    .post(&url)
                    .bearer_auth(token)
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
            })
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            PaymentError::decode(format!("capture response: {}", e)).with_response(status, text.clone())
        })?;

        Ok(CaptureResponse::new(status, body))
    }
}

impl std::fmt::Debug for PayPalAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalAdapter")
            .field("base_url", &self.config.api_base())
            .field("cache_access_token", &self.config.cache_access_token)
            .finish_non_exhaustive()
    }
}
