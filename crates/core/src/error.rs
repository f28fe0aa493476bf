use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every failure the core can produce is one of these variants; callers
/// receive them as typed results and decide how to surface them. The
/// core performs no silent recovery.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The operation is not legal in the document's current lifecycle
    /// state (e.g. a new version on a trashed document, or a purge on
    /// an active one).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The caller is not the owning user, or the target folder is locked.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A recomputed digest does not match the stored hash record.
    ///
    /// Produced only when a caller explicitly escalates a mismatch;
    /// integrity checks themselves report mismatches as data, not errors.
    #[error("Integrity violation on document {document_id}: stored {stored}, computed {computed}")]
    IntegrityViolation {
        document_id: DbId,
        stored: String,
        computed: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
