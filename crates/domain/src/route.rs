//! Route identity — the opaque "where the application currently is" value.
//!
//! A route identity is only ever compared, never parsed. Comparison is plain
//! value equality on the path string: `/products` and `/products/` are
//! different routes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the currently committed route (usually its path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteIdentity(String);

impl RouteIdentity {
    /// Wrap a path or any other route key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RouteIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for RouteIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compare_by_value() {
        assert_eq!(RouteIdentity::from("/home"), RouteIdentity::new("/home".to_string()));
    }

    #[test]
    fn should_not_normalise_trailing_slash() {
        assert_ne!(RouteIdentity::from("/products"), RouteIdentity::from("/products/"));
    }

    #[test]
    fn should_not_normalise_query_string() {
        assert_ne!(
            RouteIdentity::from("/products?page=1"),
            RouteIdentity::from("/products")
        );
    }

    #[test]
    fn should_display_raw_value() {
        assert_eq!(RouteIdentity::from("/orders/42").to_string(), "/orders/42");
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let route = RouteIdentity::from("/cart");
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(json, "\"/cart\"");
        let parsed: RouteIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, route);
    }
}
