//! Activity log entity model and DTOs.
//!
//! Activity rows are append-only and never mutated or deleted. The
//! document reference is nulled by the database when a document is
//! purged, so historical events survive.

use docguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single activity log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: DbId,
    /// One of the closed `ActionKind` values.
    pub action: String,
    pub document_id: Option<DbId>,
    pub timestamp: Timestamp,
}

/// DTO for inserting a new activity log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityLog {
    pub user_id: DbId,
    pub action: String,
    pub document_id: Option<DbId>,
}
