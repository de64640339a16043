//! Gatekeeper outcomes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::response::json_error;

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyKind {
    /// No usable `Authorization: Bearer` header.
    MissingCredential,
    /// The authority reported the token invalid, or returned no user.
    InvalidCredential,
    /// The authority could not be asked, or answered garbage.
    ValidationTransportFailure,
    /// Valid identity without the privilege the route needs.
    AuthorizationDenied,
}

impl DenyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyKind::MissingCredential => "missing_credential",
            DenyKind::InvalidCredential => "invalid_credential",
            DenyKind::ValidationTransportFailure => "validation_failed",
            DenyKind::AuthorizationDenied => "forbidden",
        }
    }
}

/// A terminal refusal: status code plus the message sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    kind: DenyKind,
    status: StatusCode,
    message: &'static str,
}

impl Denial {
    pub fn missing_token() -> Self {
        Self {
            kind: DenyKind::MissingCredential,
            status: StatusCode::UNAUTHORIZED,
            message: "No token provided",
        }
    }

    pub fn invalid_token() -> Self {
        Self {
            kind: DenyKind::InvalidCredential,
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid token",
        }
    }

    pub fn validation_failed() -> Self {
        Self {
            kind: DenyKind::ValidationTransportFailure,
            status: StatusCode::UNAUTHORIZED,
            message: "Token validation failed",
        }
    }

    pub fn logs_admin_required() -> Self {
        Self {
            kind: DenyKind::AuthorizationDenied,
            status: StatusCode::FORBIDDEN,
            message: "Admin privileges required for Logs",
        }
    }

    pub fn catalog_admin_required() -> Self {
        Self {
            kind: DenyKind::AuthorizationDenied,
            status: StatusCode::FORBIDDEN,
            message: "Admin privileges required for Catalog management",
        }
    }

    pub fn kind(&self) -> DenyKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        json_error(self.status, self.message)
    }
}

/// Exactly one of these is produced per request.
#[derive(Debug)]
pub enum Decision {
    /// Hand the (possibly annotated) request to the next stage.
    Forward(Request<Body>),
    /// Answer the caller directly; nothing is forwarded.
    Deny(Denial),
}

impl Decision {
    pub fn is_forward(&self) -> bool {
        matches!(self, Decision::Forward(_))
    }

    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Decision::Deny(d) => Some(d),
            Decision::Forward(_) => None,
        }
    }
}
