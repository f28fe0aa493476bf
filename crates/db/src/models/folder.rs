//! Folder entity model and DTOs.

use docguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `folders` table.
///
/// A locked folder rejects uploads and new versions bound for it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Folder {
    pub id: DbId,
    pub name: String,
    pub category_id: DbId,
    pub is_locked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new folder.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolder {
    pub name: String,
    pub category_id: DbId,
    pub is_locked: Option<bool>,
}
