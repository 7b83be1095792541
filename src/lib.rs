//! Plain Justice - Legal self-help backend
//!
//! Serves procedural journeys for tribunal matters and sells downloadable
//! guides: PayPal orders are captured, verified against the price catalog,
//! and recorded as entitlements that gate document downloads.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod startup;
