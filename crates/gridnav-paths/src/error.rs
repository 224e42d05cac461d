//! Error types for grid construction and path requests.
//!
//! An unreachable goal is *not* an error: searches report it through
//! [`PathResult::success`](crate::PathResult::success). Errors are reserved
//! for conditions the caller has to act on.

/// Errors raised while building a grid or servicing a path request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum NavError {
    /// A configuration value is out of range. Raised at build time, before
    /// any search runs.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A path was requested against a grid that has not been built yet.
    ///
    /// This is an initialization-ordering condition; retry once the grid
    /// is ready.
    #[error("navigation grid is not built yet")]
    GridNotReady,
}

impl NavError {
    /// Creates an invalid configuration error with the given message.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Whether retrying the same request later can succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::GridNotReady)
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NavError>;
