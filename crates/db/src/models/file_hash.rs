//! Per-document hash record model.

use docguard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `file_hashes` table. One-to-one with a document;
/// always reflects the digest of the document's current blob.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FileHash {
    pub id: DbId,
    pub document_id: DbId,
    pub hash_value: String,
    pub last_checked: Timestamp,
}
