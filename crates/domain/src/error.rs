//! Common error types used across the workspace.
//!
//! Loading-state mutations are total and never fail; errors only appear
//! where values enter the system from configuration.

/// A value failed a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A loading message was empty or whitespace-only.
    #[error("loading message must not be empty")]
    EmptyMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_empty_message() {
        assert_eq!(
            ValidationError::EmptyMessage.to_string(),
            "loading message must not be empty"
        );
    }
}
