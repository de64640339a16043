//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check policy prefixes and method names are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{uri::Authority, Method};
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid listener bind address '{0}'")]
    BindAddress(String),

    #[error("invalid authority base URL '{0}'")]
    AuthorityUrl(String),

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("{field} prefix '{prefix}' must start with '/'")]
    Prefix { field: &'static str, prefix: String },

    #[error("invalid HTTP method '{0}' in policy.mutating_methods")]
    Method(String),

    #[error("policy.admin_roles must name at least one role")]
    NoAdminRoles,

    #[error("route '{name}' has invalid upstream '{upstream}'")]
    Upstream { name: String, upstream: String },

    #[error("duplicate route name '{0}'")]
    DuplicateRoute(String),
}

/// Check a parsed configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    match url::Url::parse(&config.authority.base_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::AuthorityUrl(config.authority.base_url.clone())),
    }
    check_prefix(&mut errors, "authority.validate_path", &config.authority.validate_path);
    if config.authority.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "authority.timeout_ms" });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "timeouts.request_secs" });
    }

    let policy = &config.policy;
    check_prefix(&mut errors, "policy.auth_prefix", &policy.auth_prefix);
    check_prefix(&mut errors, "policy.logs_prefix", &policy.logs_prefix);
    for p in &policy.protected_prefixes {
        check_prefix(&mut errors, "policy.protected_prefixes", p);
    }
    for p in &policy.catalog_prefixes {
        check_prefix(&mut errors, "policy.catalog_prefixes", p);
    }
    for m in &policy.mutating_methods {
        if Method::from_bytes(m.as_bytes()).is_err() {
            errors.push(ValidationError::Method(m.clone()));
        }
    }
    if policy.admin_roles.iter().all(|r| r.trim().is_empty()) {
        errors.push(ValidationError::NoAdminRoles);
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }
        check_prefix(&mut errors, "routes.path_prefix", &route.path_prefix);
        if route.upstream.parse::<Authority>().is_err() || !route.upstream.contains(':') {
            errors.push(ValidationError::Upstream {
                name: route.name.clone(),
                upstream: route.upstream.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_prefix(errors: &mut Vec<ValidationError>, field: &'static str, prefix: &str) {
    if !prefix.starts_with('/') {
        errors.push(ValidationError::Prefix {
            field,
            prefix: prefix.to_string(),
        });
    }
}
