//! Integration tests for entitlement-gated downloads.
//!
//! 1. Without an entitlement the download is refused
//! 2. A verified purchase unlocks the same request
//! 3. Store failures fail closed
//! 4. Misconfigured files surface as 404, not 500

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use plain_justice::adapters::assets::LocalAssetStorage;
use plain_justice::adapters::auth::{SharedSecretConfig, SharedSecretValidator};
use plain_justice::adapters::entitlements::InMemoryEntitlementStore;
use plain_justice::adapters::http::{api_router, AppState, RouterConfig};
use plain_justice::adapters::paypal::MockPaymentProcessor;
use plain_justice::domain::catalog::PriceCatalog;
use plain_justice::domain::foundation::{ProductId, UserId};
use plain_justice::domain::library::AssetCatalog;
use plain_justice::ports::{EntitlementStore, StoreError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SECRET: &str = "download-test-secret-0123456789abcdef";
const USER: &str = "0f8e6c1a-3d2b-4a5e-8f7c-9b1d2e3f4a5b";
const SMALL_GUIDE: &[u8] = b"%PDF-1.4\nsmall guide body\n%%EOF";

fn token_for(sub: &str) -> String {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 600;
    encode(
        &Header::default(),
        &json!({ "sub": sub, "email": "u@example.com", "exp": exp }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

/// Store whose every call fails.
struct UnavailableStore;

#[async_trait]
impl EntitlementStore for UnavailableStore {
    async fn grant(&self, _: &UserId, _: &ProductId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn has(&self, _: &UserId, _: &ProductId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn list(&self, _: &UserId) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

fn docs_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("small-guide.pdf"), SMALL_GUIDE).unwrap();
    // pro-pack.pdf is deliberately absent.
    dir
}

fn app(docs: &TempDir, store: Arc<dyn EntitlementStore>, processor: MockPaymentProcessor) -> Router {
    let validator =
        SharedSecretValidator::new(SharedSecretConfig::new(SecretString::new(SECRET.to_string())));
    let state = AppState {
        session_validator: Arc::new(validator),
        price_catalog: Arc::new(PriceCatalog::standard()),
        payment_processor: Arc::new(processor),
        entitlement_store: store,
        asset_catalog: Arc::new(AssetCatalog::standard()),
        asset_storage: Arc::new(LocalAssetStorage::new(docs.path())),
        procedures: None,
    };
    api_router(state, &RouterConfig::default())
}

async fn get(app: &Router, uri: &str, token: &str) -> Response {
    app.clone()
        .oneshot(
            Request::get(uri)
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// =============================================================================
// Gating
// =============================================================================

#[tokio::test]
async fn download_is_forbidden_until_purchase_then_streams() {
    let docs = docs_dir();
    let store = Arc::new(InMemoryEntitlementStore::new());
    let processor = MockPaymentProcessor::new();
    let app = app(&docs, store.clone(), processor.clone());
    let token = token_for(USER);

    let response = get(&app, "/api/docs/small-guide/download", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    processor.set_capture(MockPaymentProcessor::completed_capture("ORDER1", "CAD", "5.00"));
    let capture = app
        .clone()
        .oneshot(
            Request::post("/api/payments/capture-order")
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({ "orderId": "ORDER1", "productId": "doc_small" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(capture.status(), StatusCode::OK);

    let response = get(&app, "/api/docs/small-guide/download", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"small-guide.pdf\""
    );
    assert_eq!(body_bytes(response).await, SMALL_GUIDE);
}

#[tokio::test]
async fn entitlement_of_another_user_does_not_unlock() {
    let docs = docs_dir();
    let store = Arc::new(InMemoryEntitlementStore::new());
    store
        .grant(
            &UserId::new("someone-else").unwrap(),
            &ProductId::new("doc_small").unwrap(),
        )
        .await
        .unwrap();
    let app = app(&docs, store, MockPaymentProcessor::new());

    let response = get(&app, "/api/docs/small-guide/download", &token_for(USER)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn store_failure_fails_closed() {
    let docs = docs_dir();
    let app = app(&docs, Arc::new(UnavailableStore), MockPaymentProcessor::new());

    let response = get(&app, "/api/docs/small-guide/download", &token_for(USER)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let docs = docs_dir();
    let app = app(&docs, Arc::new(InMemoryEntitlementStore::new()), MockPaymentProcessor::new());

    let response = get(&app, "/api/docs/no-such-guide/download", &token_for(USER)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn entitled_but_missing_file_is_404_without_file_name() {
    let docs = docs_dir();
    let store = Arc::new(InMemoryEntitlementStore::new());
    store
        .grant(&UserId::new(USER).unwrap(), &ProductId::new("doc_pro").unwrap())
        .await
        .unwrap();
    let app = app(&docs, store, MockPaymentProcessor::new());

    let response = get(&app, "/api/docs/pro-pack/download", &token_for(USER)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(!body.to_string().contains("pro-pack.pdf"));
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn entitlements_list_reflects_grants() {
    let docs = docs_dir();
    let store = Arc::new(InMemoryEntitlementStore::new());
    store
        .grant(&UserId::new(USER).unwrap(), &ProductId::new("doc_small").unwrap())
        .await
        .unwrap();
    let app = app(&docs, store, MockPaymentProcessor::new());

    let response = get(&app, "/api/entitlements", &token_for(USER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["product_id"], "doc_small");
}

#[tokio::test]
async fn entitlements_list_store_failure_is_502() {
    let docs = docs_dir();
    let app = app(&docs, Arc::new(UnavailableStore), MockPaymentProcessor::new());

    let response = get(&app, "/api/entitlements", &token_for(USER)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "STORE_ERROR");
}
