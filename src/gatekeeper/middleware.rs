//! Axum middleware wrapping [`Gatekeeper::decide`].

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::authority::TokenValidator;
use crate::gatekeeper::{Decision, Gatekeeper};

/// Forward allowed requests to the rest of the stack; answer denied ones here.
pub async fn gatekeeper_middleware<V: TokenValidator>(
    State(gatekeeper): State<Gatekeeper<V>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match gatekeeper.decide(request).await {
        Decision::Forward(request) => next.run(request).await,
        Decision::Deny(denial) => denial.into_response(),
    }
}
