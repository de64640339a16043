//! Upstream route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the upstream for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Longest prefix wins, ties keep declaration order
//! - Explicit no-match rather than silent default

use axum::http::uri::Authority;

use crate::config::RouteConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// A compiled upstream route.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub matcher: PathPrefixMatcher,
    pub upstream: Authority,
}

/// Immutable table of upstream routes.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Compile routes from configuration. Routes with an unparsable upstream are skipped.
    pub fn from_config(configs: &[RouteConfig]) -> Self {
        let mut routes = Vec::with_capacity(configs.len());

        for config in configs {
            match config.upstream.parse::<Authority>() {
                Ok(upstream) => routes.push(Route {
                    name: config.name.clone(),
                    matcher: PathPrefixMatcher::new(config.path_prefix.clone()),
                    upstream,
                }),
                Err(e) => {
                    tracing::warn!(route = %config.name, upstream = %config.upstream, error = %e, "Ignoring route with invalid upstream");
                }
            }
        }

        // Stable sort keeps declaration order among equal-length prefixes.
        routes.sort_by(|a, b| b.matcher.prefix().len().cmp(&a.matcher.prefix().len()));

        tracing::debug!(routes = routes.len(), "Route table compiled");
        Self { routes }
    }

    /// Find the route for `path`.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matcher.matches(path))
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, prefix: &str, upstream: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            path_prefix: prefix.into(),
            upstream: upstream.into(),
        }
    }

    #[test]
    fn test_longest_prefix_wins() {
        let router = Router::from_config(&[
            route("api", "/api", "127.0.0.1:9000"),
            route("cart", "/api/cart", "127.0.0.1:9001"),
        ]);

        assert_eq!(router.match_path("/api/cart/add").unwrap().name, "cart");
        assert_eq!(router.match_path("/api/items").unwrap().name, "api");
        assert!(router.match_path("/health").is_none());
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let router = Router::from_config(&[
            route("first", "/api/x", "127.0.0.1:9000"),
            route("second", "/api/x", "127.0.0.1:9001"),
        ]);

        assert_eq!(router.match_path("/api/x").unwrap().name, "first");
    }

    #[test]
    fn test_invalid_upstream_skipped() {
        let router = Router::from_config(&[route("bad", "/bad", "not a host")]);
        assert!(router.is_empty());
    }
}
