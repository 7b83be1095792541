//! Entitlement store adapters.
//!
//! - `PostgrestEntitlementStore` - Supabase REST
//! - `PostgresEntitlementStore` - direct sqlx access
//! - `InMemoryEntitlementStore` - development and tests

mod in_memory;
mod postgres;
mod postgrest;

pub use in_memory::InMemoryEntitlementStore;
pub use postgres::PostgresEntitlementStore;
pub use postgrest::{PostgrestConfig, PostgrestEntitlementStore};
