//! Document entity model and DTOs.

use docguard_core::lifecycle::DocumentState;
use docguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `documents` table.
///
/// `current_blob_key` always points at the blob of the highest-numbered
/// version record once at least one version exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub name: String,
    /// NULL means "unfiled".
    pub folder_id: Option<DbId>,
    pub owner_id: DbId,
    pub current_blob_key: String,
    pub uploaded_at: Timestamp,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
}

impl Document {
    /// Lifecycle state derived from the soft-delete columns.
    pub fn state(&self) -> DocumentState {
        DocumentState::from_columns(self.is_deleted, self.deleted_at)
    }
}

/// DTO for creating a new document row (inserted together with its
/// version-1 record).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub name: String,
    pub folder_id: Option<DbId>,
    pub owner_id: DbId,
    pub current_blob_key: String,
}
