//! In-memory entitlement store.
//!
//! Used for local development and tests. Same upsert semantics as the durable
//! backends: one row per `(user, product)`, refreshed on repeat grants.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{ProductId, UserId};
use crate::ports::{EntitlementStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryEntitlementStore {
    rows: RwLock<HashMap<(UserId, ProductId), Entitlement>>,
}

impl InMemoryEntitlementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a stored row, for assertions.
    pub async fn get(&self, user_id: &UserId, product_id: &ProductId) -> Option<Entitlement> {
        self.rows
            .read()
            .await
            .get(&(user_id.clone(), product_id.clone()))
            .cloned()
    }

    /// Total number of rows across all users.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl EntitlementStore for InMemoryEntitlementStore {
    async fn grant(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), StoreError> {
        let entitlement = Entitlement::grant(user_id.clone(), product_id.clone());
        self.rows
            .write()
            .await
            .insert((user_id.clone(), product_id.clone()), entitlement);
        Ok(())
    }

    async fn has(&self, user_id: &UserId, product_id: &ProductId) -> Result<bool, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .contains_key(&(user_id.clone(), product_id.clone())))
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Value>, StoreError> {
        let rows = self.rows.read().await;
        let mut owned: Vec<&Entitlement> = rows.values().filter(|e| &e.user_id == user_id).collect();
        owned.sort_by(|a, b| a.product_id.cmp(&b.product_id));

        Ok(owned
            .into_iter()
            .map(|e| {
                json!({
                    "product_id": e.product_id.as_str(),
                    "granted_at": e.granted_at.to_rfc3339(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn user(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn product(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    #[tokio::test]
    async fn has_is_true_only_for_granted_pair() {
        let store = InMemoryEntitlementStore::new();
        store.grant(&user("u1"), &product("doc_small")).await.unwrap();

        assert!(store.has(&user("u1"), &product("doc_small")).await.unwrap());
        assert!(!store.has(&user("u1"), &product("doc_pro")).await.unwrap());
        assert!(!store.has(&user("u2"), &product("doc_small")).await.unwrap());
    }

    #[tokio::test]
    async fn repeated_grant_keeps_one_row_and_refreshes_timestamp() {
        let store = InMemoryEntitlementStore::new();
        store.grant(&user("u1"), &product("doc_small")).await.unwrap();
        let first = store.get(&user("u1"), &product("doc_small")).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.grant(&user("u1"), &product("doc_small")).await.unwrap();
        let second = store.get(&user("u1"), &product("doc_small")).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(second.granted_at.is_after(&first.granted_at));
    }

    #[tokio::test]
    async fn concurrent_grants_do_not_duplicate() {
        let store = Arc::new(InMemoryEntitlementStore::new());
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.grant(&user("u1"), &product("doc_pro")).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn list_returns_only_callers_rows() {
        let store = InMemoryEntitlementStore::new();
        store.grant(&user("u1"), &product("doc_small")).await.unwrap();
        store.grant(&user("u1"), &product("doc_pro")).await.unwrap();
        store.grant(&user("u2"), &product("doc_small")).await.unwrap();

        let rows = store.list(&user("u1")).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["product_id"], "doc_pro");
        assert_eq!(rows[1]["product_id"], "doc_small");
        assert!(rows[0]["granted_at"].is_string());
    }
}
