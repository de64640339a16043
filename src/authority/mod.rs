//! Remote authentication authority.
//!
//! # Data Flow
//! ```text
//! bearer token
//!     → client.rs (GET validate endpoint, bounded by timeout)
//!     → types.rs (UserInfo | ValidationFailed)
//!     → gatekeeper decides
//! ```
//!
//! The gatekeeper only depends on [`TokenValidator`], so tests and the CLI
//! can substitute their own implementation.

pub mod client;
pub mod types;

use std::future::Future;

pub use client::{AuthorityClient, AuthorityInitError};
pub use types::{UserInfo, ValidationFailed};

/// A single-shot, non-blocking token check.
///
/// `Ok(None)` means the authority answered without any user information.
pub trait TokenValidator: Send + Sync + 'static {
    fn validate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<UserInfo>, ValidationFailed>> + Send;
}
