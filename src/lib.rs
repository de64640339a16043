//! Authenticating API gateway library.
//!
//! Every request passes the [`gatekeeper`] before it reaches an upstream
//! service: tokens are validated against the remote [`authority`], the
//! route policy is applied, and allowed requests are forwarded with
//! `X-User-Name` / `X-User-Roles` headers.

pub mod authority;
pub mod config;
pub mod gatekeeper;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use gatekeeper::{Decision, Gatekeeper};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
