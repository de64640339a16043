//! Path prefix matching.
//!
//! # Design Decisions
//! - Path matching is case-sensitive, plain `starts_with`
//! - No segment boundary: "/api/items" also matches "/api/itemsX"
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Combines several prefix matchers with OR semantics.
#[derive(Debug, Clone, Default)]
pub struct PrefixSet {
    matchers: Vec<PathPrefixMatcher>,
}

impl PrefixSet {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matchers: prefixes.into_iter().map(PathPrefixMatcher::new).collect(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        // Any matcher may pass (OR)
        self.matchers.iter().any(|m| m.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api/cart");

        assert!(matcher.matches("/api/cart"));
        assert!(matcher.matches("/api/cart/add"));
        assert!(matcher.matches("/api/cartography"));
        assert!(!matcher.matches("/API/cart"));
        assert!(!matcher.matches("/api/car"));
    }

    #[test]
    fn test_prefix_set() {
        let set = PrefixSet::new(["/api/items", "/api/inventory"]);

        assert!(set.matches("/api/items/1"));
        assert!(set.matches("/api/inventory"));
        assert!(!set.matches("/api/cart"));
        assert!(!PrefixSet::default().matches("/"));
    }
}
