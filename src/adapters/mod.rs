//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer token verification
//! - `paypal` - Payment processor
//! - `entitlements` - Entitlement persistence (PostgREST, Postgres, in-memory)
//! - `assets` - Document files and slug bindings
//! - `journey` - Procedures data file
//! - `http` - REST API

pub mod assets;
pub mod auth;
pub mod entitlements;
pub mod http;
pub mod journey;
pub mod paypal;
