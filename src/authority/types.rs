//! Identity types and the authority error.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of validating a token with the authority.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserInfo {
    pub valid: bool,

    #[serde(default)]
    pub username: String,

    /// Sorted so the propagated roles header is stable across requests.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl UserInfo {
    /// True if any role in `admin_roles` is held.
    pub fn has_any_role(&self, admin_roles: &[String]) -> bool {
        admin_roles.iter().any(|r| self.roles.contains(r))
    }

    /// Roles joined with "," for the `X-User-Roles` header.
    pub fn roles_header(&self) -> String {
        self.roles.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }
}

/// The authority could not produce an answer.
///
/// Transport errors, timeouts, non-2xx statuses and malformed bodies all
/// collapse into this one error. The reason is for logs only.
#[derive(Debug, Error)]
#[error("token validation failed: {reason}")]
pub struct ValidationFailed {
    reason: String,
}

impl ValidationFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
