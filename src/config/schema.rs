//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Remote authentication authority.
    pub authority: AuthorityConfig,

    /// Authorization policy table.
    pub policy: PolicyConfig,

    /// Upstream service routes.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where and how tokens are validated.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthorityConfig {
    /// Base URL of the authentication service (e.g., "http://127.0.0.1:8081").
    pub base_url: String,

    /// Path of the validation endpoint, appended to `base_url`.
    pub validate_path: String,

    /// Upper bound on a single validation call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8081".to_string(),
            validate_path: "/api/auth/validate".to_string(),
            timeout_ms: 3_000,
        }
    }
}

/// Path/method policy table. Loaded once, never mutated.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Prefix of the authentication service; always reachable without a token.
    pub auth_prefix: String,

    /// Prefixes that require a valid token.
    pub protected_prefixes: Vec<String>,

    /// Prefix restricted to administrators for every method.
    pub logs_prefix: String,

    /// Prefixes where mutating methods require an administrator.
    pub catalog_prefixes: Vec<String>,

    /// Methods treated as state-mutating.
    pub mutating_methods: Vec<String>,

    /// Role names that grant administrator privileges.
    pub admin_roles: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            auth_prefix: "/api/auth".to_string(),
            protected_prefixes: vec![
                "/api/items".to_string(),
                "/api/inventory".to_string(),
                "/api/cart".to_string(),
                "/api/notifications".to_string(),
                "/api/logs".to_string(),
            ],
            logs_prefix: "/api/logs".to_string(),
            // Singular on purpose, see DESIGN.md.
            catalog_prefixes: vec![
                "/api/items".to_string(),
                "/api/inventory".to_string(),
                "/api/notification".to_string(),
            ],
            mutating_methods: vec!["POST".to_string(), "PUT".to_string(), "DELETE".to_string()],
            admin_roles: vec!["ADMIN".to_string(), "ROLE_ADMIN".to_string()],
        }
    }
}

/// Route configuration mapping a path prefix to an upstream service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Path prefix to match.
    pub path_prefix: String,

    /// Upstream address (e.g., "127.0.0.1:3000").
    pub upstream: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for upstream request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), used when RUST_LOG is unset.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
