//! ListEntitlementsHandler - Query handler for a caller's purchases.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::IdentityContext;
use crate::domain::library::LibraryError;
use crate::ports::EntitlementStore;

/// Query for the caller's entitlement rows.
#[derive(Debug, Clone)]
pub struct ListEntitlementsQuery {
    pub identity: IdentityContext,
}

/// Store rows, unmodified.
#[derive(Debug, Clone)]
pub struct ListEntitlementsResult {
    pub rows: Vec<Value>,
}

pub struct ListEntitlementsHandler {
    store: Arc<dyn EntitlementStore>,
}

impl ListEntitlementsHandler {
    pub fn new(store: Arc<dyn EntitlementStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListEntitlementsQuery,
    ) -> Result<ListEntitlementsResult, LibraryError> {
        let rows = self
            .store
            .list(&query.identity.subject_id)
            .await
            .map_err(|e| {
                tracing::warn!(user_id = %query.identity.subject_id, "Entitlement listing failed: {}", e);
                LibraryError::store(e.to_string())
            })?;

        Ok(ListEntitlementsResult { rows })
    }
}
