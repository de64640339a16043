//! Request classification by path prefix.

use crate::gatekeeper::policy::RoutePolicy;

/// How the gatekeeper treats a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// The authentication service itself; reachable without a token.
    AuthService,
    /// Requires a validated token and passes through authorization.
    Protected,
    /// Not under any protected prefix; passed through untouched.
    Public,
}

impl RouteClass {
    pub fn requires_auth(self) -> bool {
        matches!(self, RouteClass::Protected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteClass::AuthService => "auth_service",
            RouteClass::Protected => "protected",
            RouteClass::Public => "public",
        }
    }
}

/// Classify `path`. The auth prefix is checked before the protected prefixes.
pub fn classify(policy: &RoutePolicy, path: &str) -> RouteClass {
    if policy.auth_prefix.matches(path) {
        RouteClass::AuthService
    } else if policy.protected.matches(path) {
        RouteClass::Protected
    } else {
        RouteClass::Public
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;

    #[test]
    fn test_default_classification() {
        let policy = RoutePolicy::from_config(&PolicyConfig::default());

        assert_eq!(classify(&policy, "/api/auth/login"), RouteClass::AuthService);
        assert_eq!(classify(&policy, "/api/auth"), RouteClass::AuthService);
        for path in [
            "/api/items",
            "/api/items/7",
            "/api/inventory/3",
            "/api/cart/add",
            "/api/notifications",
            "/api/logs/today",
        ] {
            assert_eq!(classify(&policy, path), RouteClass::Protected, "{path}");
        }
        for path in ["/", "/health", "/api/users", "/api/notification/1", "/API/items"] {
            assert_eq!(classify(&policy, path), RouteClass::Public, "{path}");
        }
    }

    #[test]
    fn test_auth_prefix_checked_first() {
        let mut config = PolicyConfig::default();
        config.protected_prefixes.push("/api".into());
        let policy = RoutePolicy::from_config(&config);

        assert_eq!(classify(&policy, "/api/auth/token"), RouteClass::AuthService);
        assert_eq!(classify(&policy, "/api/other"), RouteClass::Protected);
    }
}
