//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, identity, errors)
//! - `catalog` - Server-held price catalog
//! - `purchase` - Order capture verification and purchase outcomes
//! - `entitlement` - Proof-of-purchase records
//! - `library` - Gated document bindings
//! - `journey` - Procedural journey rules

pub mod catalog;
pub mod entitlement;
pub mod foundation;
pub mod journey;
pub mod library;
pub mod purchase;
