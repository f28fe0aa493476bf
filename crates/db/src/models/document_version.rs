//! Document version entity model.
//!
//! Version records are immutable once created; there is no update DTO.

use docguard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `document_versions` table.
///
/// For a given document the version numbers form a contiguous run
/// `1..N` with no gaps or duplicates.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentVersion {
    pub id: DbId,
    pub document_id: DbId,
    pub blob_key: String,
    pub version_number: i32,
    pub created_at: Timestamp,
}
