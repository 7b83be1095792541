//! Wires configuration into adapters and the HTTP router.

use std::sync::Arc;

use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::adapters::assets::{load_bindings, BindingsFileError, LocalAssetStorage};
use crate::adapters::auth::{SharedSecretConfig, SharedSecretValidator};
use crate::adapters::entitlements::{
    InMemoryEntitlementStore, PostgresEntitlementStore, PostgrestConfig, PostgrestEntitlementStore,
};
use crate::adapters::http::{api_router, AppState, RouterConfig};
use crate::adapters::journey::load_procedures;
use crate::adapters::paypal::PayPalAdapter;
use crate::config::{AppConfig, StoreBackend, ValidationError};
use crate::domain::catalog::PriceCatalog;
use crate::domain::library::AssetCatalog;
use crate::ports::{EntitlementStore, PaymentError, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ValidationError),

    #[error("Payment processor setup failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("Entitlement store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("Database setup failed: {0}")]
    Database(String),

    #[error(transparent)]
    Bindings(#[from] BindingsFileError),
}

/// Builds every adapter the service needs.
pub async fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    let mut auth = SharedSecretConfig::new(config.auth.jwt_secret.clone());
    if let Some(audience) = &config.auth.audience {
        auth = auth.with_audience(audience.clone());
    }
    let session_validator = Arc::new(SharedSecretValidator::new(auth));

    let payment_processor = Arc::new(PayPalAdapter::new(config.paypal.adapter_config()?)?);
    let entitlement_store = build_store(config).await?;

    let asset_catalog = match &config.assets.bindings_file {
        Some(path) => load_bindings(path)?,
        None => AssetCatalog::standard(),
    };
    tracing::info!(
        bindings = asset_catalog.len(),
        docs_dir = %config.assets.docs_dir.display(),
        "asset catalog ready"
    );

    let procedures = config
        .journey
        .procedures_file
        .as_deref()
        .and_then(load_procedures)
        .map(Arc::new);

    Ok(AppState {
        session_validator,
        price_catalog: Arc::new(PriceCatalog::standard()),
        payment_processor,
        entitlement_store,
        asset_catalog: Arc::new(asset_catalog),
        asset_storage: Arc::new(LocalAssetStorage::new(config.assets.docs_dir.clone())),
        procedures,
    })
}

async fn build_store(config: &AppConfig) -> Result<Arc<dyn EntitlementStore>, StartupError> {
    let store = &config.store;
    match store.backend {
        StoreBackend::Postgrest => {
            let url = store
                .supabase_url
                .clone()
                .ok_or(ValidationError::MissingRequired("STORE__SUPABASE_URL"))?;
            let key: SecretString = store.supabase_service_role_key.clone().ok_or(
                ValidationError::MissingRequired("STORE__SUPABASE_SERVICE_ROLE_KEY"),
            )?;
            let config = PostgrestConfig::new(url, key).with_timeout(store.timeout());
            tracing::info!("entitlement store: postgrest");
            Ok(Arc::new(PostgrestEntitlementStore::new(config)?))
        }
        StoreBackend::Postgres => {
            let url = store
                .database_url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("STORE__DATABASE_URL"))?;
            let pool = PgPoolOptions::new()
                .max_connections(store.max_connections)
                .acquire_timeout(store.timeout())
                .connect(url)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            if store.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .map_err(|e| StartupError::Database(e.to_string()))?;
            }
            tracing::info!("entitlement store: postgres");
            Ok(Arc::new(
                PostgresEntitlementStore::new(pool).with_timeout(store.timeout()),
            ))
        }
        StoreBackend::Memory => {
            tracing::warn!("entitlement store: in-memory, grants are lost on restart");
            Ok(Arc::new(InMemoryEntitlementStore::new()))
        }
    }
}

/// Router settings from the server section.
pub fn router_config(config: &AppConfig) -> RouterConfig {
    RouterConfig {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    }
}

/// Full application: adapters plus router.
pub async fn build_app(config: &AppConfig) -> Result<axum::Router, StartupError> {
    let state = build_state(config).await?;
    Ok(api_router(state, &router_config(config)))
}
