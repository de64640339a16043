//! Gatekeeper: authentication and authorization at the edge.
//!
//! # Data Flow
//! ```text
//! Request
//!     → classifier.rs (auth service | protected | public)
//!     → token.rs (Authorization: Bearer <token>)
//!     → authority (remote validation, awaited without blocking)
//!     → policy.rs (logs admin rule, catalog mutation rule)
//!     → decision.rs (Forward with identity headers | Deny with JSON body)
//! ```
//!
//! # Design Decisions
//! - Policy is compiled once and shared read-only
//! - No state is carried between requests; the same request always
//!   yields the same decision for the same authority answer
//! - Every authority failure collapses to one 401, logged separately
//!   from an invalid token
//! - Identity headers are trusted downstream, so the gateway must be the
//!   only entry point to the services

pub mod classifier;
pub mod decision;
pub mod middleware;
pub mod policy;
pub mod token;

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
};

use crate::authority::{TokenValidator, UserInfo};
use crate::http::RequestIdExt;
use crate::observability::metrics;

pub use classifier::{classify, RouteClass};
pub use decision::{Decision, Denial, DenyKind};
pub use middleware::gatekeeper_middleware;
pub use policy::RoutePolicy;

pub const X_USER_NAME: HeaderName = HeaderName::from_static("x-user-name");
pub const X_USER_ROLES: HeaderName = HeaderName::from_static("x-user-roles");

/// The per-request decision engine.
pub struct Gatekeeper<V> {
    policy: Arc<RoutePolicy>,
    validator: Arc<V>,
}

impl<V> Clone for Gatekeeper<V> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<V: TokenValidator> Gatekeeper<V> {
    pub fn new(policy: RoutePolicy, validator: V) -> Self {
        Self {
            policy: Arc::new(policy),
            validator: Arc::new(validator),
        }
    }

    /// Run the full pipeline for one request.
    pub async fn decide(&self, request: Request<Body>) -> Decision {
        let path = request.uri().path().to_owned();
        let method = request.method().clone();
        let request_id = request.request_id().to_owned();

        let class = classify(&self.policy, &path);
        if !class.requires_auth() {
            tracing::debug!(request_id = %request_id, method = %method, path = %path, class = class.as_str(), "Bypassing authentication");
            metrics::record_decision("bypass");
            return Decision::Forward(request);
        }

        let Some(token) = token::extract_bearer(request.headers()).map(Cow::into_owned) else {
            return self.deny(&request_id, &method, &path, Denial::missing_token());
        };

        let started = Instant::now();
        let answer = self.validator.validate(&token).await;
        metrics::record_validation(started.elapsed());

        let user = match answer {
            Ok(Some(user)) if user.valid => user,
            Ok(_) => return self.deny(&request_id, &method, &path, Denial::invalid_token()),
            Err(e) => {
                tracing::warn!(request_id = %request_id, path = %path, reason = e.reason(), "Token validation call failed");
                return self.deny(&request_id, &method, &path, Denial::validation_failed());
            }
        };

        if let Err(denial) = self.policy.authorize(&path, &method, &user) {
            tracing::info!(request_id = %request_id, username = %user.username, "Insufficient privileges");
            return self.deny(&request_id, &method, &path, denial);
        }

        match with_identity(request, &user) {
            Ok(request) => {
                tracing::debug!(request_id = %request_id, method = %method, path = %path, username = %user.username, "Request authorized");
                metrics::record_decision("forward");
                Decision::Forward(request)
            }
            Err(e) => {
                tracing::warn!(request_id = %request_id, path = %path, error = %e, "Authority returned identity unusable as header");
                self.deny(&request_id, &method, &path, Denial::validation_failed())
            }
        }
    }

    fn deny(&self, request_id: &str, method: &axum::http::Method, path: &str, denial: Denial) -> Decision {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            outcome = denial.kind().as_str(),
            status = denial.status().as_u16(),
            "Request denied"
        );
        metrics::record_decision(denial.kind().as_str());
        Decision::Deny(denial)
    }
}

/// Stamp the identity headers, replacing any the client sent.
fn with_identity(
    mut request: Request<Body>,
    user: &UserInfo,
) -> Result<Request<Body>, axum::http::header::InvalidHeaderValue> {
    let name = HeaderValue::from_str(&user.username)?;
    let roles = HeaderValue::from_str(&user.roles_header())?;

    let headers = request.headers_mut();
    headers.insert(X_USER_NAME, name);
    headers.insert(X_USER_ROLES, roles);
    Ok(request)
}
