//! Monitored-file flag model.

use docguard_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `monitored_files` table. One-to-one with a document;
/// scopes the integrity sweep.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonitoredFile {
    pub id: DbId,
    pub document_id: DbId,
    pub is_monitored: bool,
}
