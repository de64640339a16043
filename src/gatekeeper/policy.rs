//! Authorization policy.
//!
//! Evaluated only after the token has been validated. Rules are checked in
//! order and the first one that applies decides:
//!
//! 1. logs prefix: administrators only, every method
//! 2. catalog prefix with a mutating method: administrators only
//! 3. everything else: allowed

use axum::http::Method;

use crate::authority::UserInfo;
use crate::config::PolicyConfig;
use crate::gatekeeper::decision::Denial;
use crate::routing::{PathPrefixMatcher, PrefixSet};

/// Static path/method policy table, built once at startup.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    pub(crate) auth_prefix: PathPrefixMatcher,
    pub(crate) protected: PrefixSet,
    logs_prefix: PathPrefixMatcher,
    catalog: PrefixSet,
    mutating_methods: Vec<Method>,
    admin_roles: Vec<String>,
}

impl RoutePolicy {
    /// Compile the policy. Method names that do not parse are skipped;
    /// `validate_config` rejects them before this point.
    pub fn from_config(config: &PolicyConfig) -> Self {
        let mutating_methods = config
            .mutating_methods
            .iter()
            .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
            .collect();

        Self {
            auth_prefix: PathPrefixMatcher::new(config.auth_prefix.clone()),
            protected: PrefixSet::new(config.protected_prefixes.iter().cloned()),
            logs_prefix: PathPrefixMatcher::new(config.logs_prefix.clone()),
            catalog: PrefixSet::new(config.catalog_prefixes.iter().cloned()),
            mutating_methods,
            admin_roles: config.admin_roles.clone(),
        }
    }

    pub fn is_admin(&self, user: &UserInfo) -> bool {
        user.has_any_role(&self.admin_roles)
    }

    pub fn is_mutating(&self, method: &Method) -> bool {
        self.mutating_methods.contains(method)
    }

    /// Decide whether a validated `user` may call `method path`.
    pub fn authorize(&self, path: &str, method: &Method, user: &UserInfo) -> Result<(), Denial> {
        if self.logs_prefix.matches(path) {
            if !self.is_admin(user) {
                return Err(Denial::logs_admin_required());
            }
        } else if self.catalog.matches(path) && self.is_mutating(method) {
            if !self.is_admin(user) {
                return Err(Denial::catalog_admin_required());
            }
        }
        Ok(())
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}
