//! Unified error handling for the client application layer.

use thiserror::Error;

use crate::db::StoreError;

/// Application-level error type for slice operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Object store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Referenced record is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation's cancellation token fired while the durable write
    /// was in flight; the in-memory reduction was skipped.
    #[error("operation cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AppError::NotFound("order 123".to_owned());
        assert_eq!(err.to_string(), "not found: order 123");

        assert_eq!(AppError::Cancelled.to_string(), "operation cancelled");
    }
}
