use docguard_core::error::CoreError;

/// Service-level error type.
///
/// Wraps [`CoreError`] for domain failures and adds the two
/// infrastructure sources: the metadata database and the content
/// store. Storage failures abort the operation before any metadata is
/// committed; they are retryable by the caller, never retried here.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain-level error from `docguard-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A blob read/write failure in the content store.
    #[error("Storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

/// Convenience type alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;
