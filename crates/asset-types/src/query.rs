//! Fetch state of a cached query
//!
//! Mirrors what a query cache knows about one key: nothing yet, a value, or
//! the last failure. The policy layer only ever reads this.

use std::sync::Arc;

/// State of one cached fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    /// Not fetched yet, or fetch in flight
    Pending,
    /// Last fetch succeeded
    Ready(Arc<T>),
    /// Last fetch failed
    Failed(String),
}

impl<T> QueryState<T> {
    /// Wrap a fetched value
    #[inline]
    #[must_use]
    pub fn ready(value: T) -> Self {
        Self::Ready(Arc::new(value))
    }

    /// Record a failure message
    #[inline]
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// A value is available
    #[inline]
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The last fetch failed
    #[inline]
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Fetched value, if any
    #[inline]
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Failure message, if any
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::Pending
    }
}
