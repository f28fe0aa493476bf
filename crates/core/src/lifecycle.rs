//! Document lifecycle state machine.
//!
//! A document is Active until soft-deleted (Trashed), and may be
//! restored back to Active. Permanent deletion is terminal and removes
//! the row entirely, so it has no state here -- a purged document is
//! simply not found.

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Lifecycle state of a document row that still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Active,
    Trashed,
}

impl DocumentState {
    /// Derive the state from the soft-delete columns.
    ///
    /// The two columns are kept in lockstep (`deleted_at` is set iff
    /// `is_deleted`); `is_deleted` is authoritative if they ever drift.
    pub fn from_columns(is_deleted: bool, _deleted_at: Option<Timestamp>) -> Self {
        if is_deleted {
            Self::Trashed
        } else {
            Self::Active
        }
    }
}

/// Guard: the operation requires an Active document.
pub fn ensure_active(state: DocumentState, document_id: DbId) -> Result<(), CoreError> {
    match state {
        DocumentState::Active => Ok(()),
        DocumentState::Trashed => Err(CoreError::InvalidState(format!(
            "Document {document_id} is in the trash"
        ))),
    }
}

/// Guard: the operation requires a Trashed document.
///
/// Permanent deletion goes through here -- trash is a mandatory
/// quarantine step, a document is never purged straight from Active.
pub fn ensure_trashed(state: DocumentState, document_id: DbId) -> Result<(), CoreError> {
    match state {
        DocumentState::Trashed => Ok(()),
        DocumentState::Active => Err(CoreError::InvalidState(format!(
            "Document {document_id} is not in the trash"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn state_from_columns() {
        assert_eq!(
            DocumentState::from_columns(false, None),
            DocumentState::Active
        );
        assert_eq!(
            DocumentState::from_columns(true, Some(chrono::Utc::now())),
            DocumentState::Trashed
        );
    }

    #[test]
    fn active_guard() {
        assert!(ensure_active(DocumentState::Active, 1).is_ok());
        assert_matches!(
            ensure_active(DocumentState::Trashed, 1),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn trashed_guard() {
        assert!(ensure_trashed(DocumentState::Trashed, 1).is_ok());
        assert_matches!(
            ensure_trashed(DocumentState::Active, 1),
            Err(CoreError::InvalidState(_))
        );
    }
}
