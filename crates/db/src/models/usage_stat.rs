//! Usage statistics models.

use docguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `usage_stats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsageStat {
    pub id: DbId,
    pub document_id: DbId,
    pub accessed_by: DbId,
    pub action: String,
    pub accessed_at: Timestamp,
}

/// DTO for recording a usage event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUsageStat {
    pub document_id: DbId,
    pub accessed_by: DbId,
    pub action: String,
}

/// Per-action access count for a document (analytics aggregation).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsageCount {
    pub action: String,
    pub count: i64,
}
