//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer ordering)
//!     → request.rs (request ID)
//!     → gatekeeper (authenticate, authorize, stamp identity)
//!     → server.rs proxy handler (route lookup, forward upstream)
//!     → response.rs (gateway-generated JSON errors)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, HttpServer};
