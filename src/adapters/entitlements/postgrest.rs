//! PostgREST entitlement store (Supabase REST).
//!
//! Talks to `/rest/v1/entitlements` with the service-role key. Grants are
//! upserts via `Prefer: resolution=merge-duplicates` on the
//! `(user_id, product_id)` primary key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::{ProductId, Timestamp, UserId};
use crate::ports::{EntitlementStore, StoreError};

const TABLE_PATH: &str = "/rest/v1/entitlements";

/// PostgREST connection settings.
#[derive(Clone)]
pub struct PostgrestConfig {
    base_url: String,
    service_role_key: SecretString,
    timeout: Duration,
}

impl PostgrestConfig {
    pub fn new(base_url: impl Into<String>, service_role_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            service_role_key,
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn table_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), TABLE_PATH)
    }
}

#[derive(Serialize)]
struct GrantRow<'a> {
    user_id: &'a str,
    product_id: &'a str,
    granted_at: String,
}

/// Entitlement store backed by a PostgREST endpoint.
pub struct PostgrestEntitlementStore {
    config: PostgrestConfig,
    http_client: reqwest::Client,
}

impl PostgrestEntitlementStore {
    pub fn new(config: PostgrestConfig) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let key = self.config.service_role_key.expose_secret();
        builder.header("apikey", key).bearer_auth(key)
    }

    async fn fetch_rows(&self, query: &[(&str, String)]) -> Result<Vec<Value>, StoreError> {
        let response = self
            .authorized(self.http_client.get(self.config.table_url()))
            .query(query)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl EntitlementStore for PostgrestEntitlementStore {
    async fn grant(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), StoreError> {
        let rows = [GrantRow {
            user_id: user_id.as_str(),
            product_id: product_id.as_str(),
            granted_at: Timestamp::now().to_rfc3339(),
        }];

        let response = self
            .authorized(self.http_client.post(self.config.table_url()))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&rows)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "entitlement upsert rejected");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    async fn has(&self, user_id: &UserId, product_id: &ProductId) -> Result<bool, StoreError> {
        let rows = self
            .fetch_rows(&[
                ("user_id", format!("eq.{}", user_id)),
                ("product_id", format!("eq.{}", product_id)),
                ("select", "product_id".to_string()),
            ])
            .await?;

        Ok(!rows.is_empty())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Value>, StoreError> {
        self.fetch_rows(&[
            ("user_id", format!("eq.{}", user_id)),
            ("select", "product_id,granted_at".to_string()),
        ])
        .await
    }
}

impl std::fmt::Debug for PostgrestEntitlementStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestEntitlementStore")
            .field("table_url", &self.config.table_url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_partial_json, header, headers, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> PostgrestEntitlementStore {
        let config = PostgrestConfig::new(server.uri(), SecretString::new("service-key".to_string()));
        PostgrestEntitlementStore::new(config).unwrap()
    }

    fn user() -> UserId {
        UserId::new("2b1c7a0e-9f7e-4c55-8d0a-9d1f1f2d3e4a").unwrap()
    }

    fn product() -> ProductId {
        ProductId::new("doc_small").unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Grant Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn grant_upserts_with_merge_duplicates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/entitlements"))
            .and(header("apikey", "service-key"))
            .and(bearer_token("service-key"))
            .and(headers("Prefer", vec!["resolution=merge-duplicates", "return=representation"]))
            .and(body_partial_json(json!([{
                "user_id": "2b1c7a0e-9f7e-4c55-8d0a-9d1f1f2d3e4a",
                "product_id": "doc_small"
            }])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{}])))
            .expect(1)
            .mount(&server)
            .await;

        store(&server).grant(&user(), &product()).await.unwrap();
    }

    #[tokio::test]
    async fn grant_non_success_is_rejected_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/entitlements"))
            .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\":\"JWT expired\"}"))
            .mount(&server)
            .await;

        let err = store(&server).grant(&user(), &product()).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 401, .. }));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Existence Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn has_is_true_when_row_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/entitlements"))
            .and(query_param("user_id", "eq.2b1c7a0e-9f7e-4c55-8d0a-9d1f1f2d3e4a"))
            .and(query_param("product_id", "eq.doc_small"))
            .and(query_param("select", "product_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "product_id": "doc_small" }])))
            .mount(&server)
            .await;

        assert!(store(&server).has(&user(), &product()).await.unwrap());
    }

    #[tokio::test]
    async fn has_is_false_for_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/entitlements"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        assert!(!store(&server).has(&user(), &product()).await.unwrap());
    }

    #[tokio::test]
    async fn has_surfaces_errors_instead_of_false() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/entitlements"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = store(&server).has(&user(), &product()).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 500, .. }));
    }

    #[tokio::test]
    async fn has_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/entitlements"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = store(&server).has(&user(), &product()).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        let config = PostgrestConfig::new("http://127.0.0.1:9", SecretString::new("k".to_string()))
            .with_timeout(Duration::from_millis(500));
        let store = PostgrestEntitlementStore::new(config).unwrap();

        let err = store.has(&user(), &product()).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // List Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn list_returns_raw_rows() {
        let server = MockServer::start().await;
        let rows = json!([
            { "product_id": "doc_small", "granted_at": "2024-03-01T10:00:00+00:00" },
            { "product_id": "doc_pro", "granted_at": "2024-03-02T10:00:00+00:00" }
        ]);
        Mock::given(method("GET"))
            .and(path("/rest/v1/entitlements"))
            .and(query_param("select", "product_id,granted_at"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows.clone()))
            .mount(&server)
            .await;

        let listed = store(&server).list(&user()).await.unwrap();
        assert_eq!(Value::Array(listed), rows);
    }
}
