//! PostgreSQL entitlement store.
//!
//! Direct sqlx access to the `entitlements` table created by
//! `migrations/0001_entitlements.sql`. Every query, pool acquire included,
//! is bounded by the store timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ProductId, UserId};
use crate::ports::{EntitlementStore, StoreError};

/// PostgreSQL implementation of the EntitlementStore port.
pub struct PostgresEntitlementStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresEntitlementStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T>(
        &self,
        query: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(query_error),
            Err(_) => Err(StoreError::Unavailable(format!(
                "query timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EntitlementRow {
    product_id: String,
    granted_at: DateTime<Utc>,
}

impl EntitlementRow {
    fn to_json(&self) -> Value {
        json!({
            "product_id": self.product_id,
            "granted_at": self.granted_at.to_rfc3339(),
        })
    }
}

/// Subject ids are Supabase user UUIDs.
fn user_uuid(user_id: &UserId) -> Result<Uuid, StoreError> {
    Uuid::parse_str(user_id.as_str())
        .map_err(|e| StoreError::Query(format!("user_id is not a UUID: {}", e)))
}

fn query_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

#[async_trait]
impl EntitlementStore for PostgresEntitlementStore {
    fn check_subject(&self, user_id: &UserId) -> Result<(), StoreError> {
        user_uuid(user_id).map(|_| ())
    }

    async fn grant(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), StoreError> {
        let user = user_uuid(user_id)?;
        self.bounded(
            sqlx::query(
                r#"
                INSERT INTO entitlements (user_id, product_id, granted_at)
                VALUES ($1, $2, now())
                ON CONFLICT (user_id, product_id)
                DO UPDATE SET granted_at = EXCLUDED.granted_at
                "#,
            )
            .bind(user)
            .bind(product_id.as_str())
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn has(&self, user_id: &UserId, product_id: &ProductId) -> Result<bool, StoreError> {
        let user = user_uuid(user_id)?;
        let exists: bool = self
            .bounded(
                sqlx::query_scalar(
                    "SELECT EXISTS (SELECT 1 FROM entitlements WHERE user_id = $1 AND product_id = $2)",
                )
                .bind(user)
                .bind(product_id.as_str())
                .fetch_one(&self.pool),
            )
            .await?;

        Ok(exists)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Value>, StoreError> {
        let user = user_uuid(user_id)?;
        let rows: Vec<EntitlementRow> = self
            .bounded(
                sqlx::query_as(
                    r#"
                    SELECT product_id, granted_at
                    FROM entitlements
                    WHERE user_id = $1
                    ORDER BY product_id
                    "#,
                )
                .bind(user)
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.iter().map(EntitlementRow::to_json).collect())
    }
}
