//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `shared_secret` - HS256 tokens signed with the identity provider's secret
//! - `mock` - Test implementation that doesn't require real tokens

mod mock;
mod shared_secret;

pub use mock::MockSessionValidator;
pub use shared_secret::{SharedSecretConfig, SharedSecretValidator};
