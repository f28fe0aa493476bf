//! Repository for the `monitored_files` table.

use docguard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::monitored_file::MonitoredFile;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, document_id, is_monitored";

/// Provides flag management for the integrity sweep scope.
pub struct MonitoredFileRepo;

impl MonitoredFileRepo {
    /// Ensure a monitoring row exists for a document (monitored by
    /// default). Part of the upload transaction.
    pub async fn ensure(
        conn: &mut PgConnection,
        document_id: DbId,
    ) -> Result<MonitoredFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO monitored_files (document_id)
             VALUES ($1)
             ON CONFLICT (document_id) DO UPDATE SET document_id = EXCLUDED.document_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MonitoredFile>(&query)
            .bind(document_id)
            .fetch_one(conn)
            .await
    }

    /// Find the monitoring flag for a document.
    pub async fn find_by_document(
        pool: &PgPool,
        document_id: DbId,
    ) -> Result<Option<MonitoredFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM monitored_files WHERE document_id = $1");
        sqlx::query_as::<_, MonitoredFile>(&query)
            .bind(document_id)
            .fetch_optional(pool)
            .await
    }

    /// Turn monitoring on or off. Returns `true` if a row was updated.
    pub async fn set_monitored(
        pool: &PgPool,
        document_id: DbId,
        monitored: bool,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE monitored_files SET is_monitored = $2 WHERE document_id = $1")
                .bind(document_id)
                .bind(monitored)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// IDs of live documents currently under monitoring, for the
    /// integrity sweep.
    pub async fn monitored_document_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT m.document_id \
             FROM monitored_files m \
             JOIN documents d ON d.id = m.document_id \
             WHERE m.is_monitored = TRUE AND d.deleted_at IS NULL \
             ORDER BY m.document_id",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete the monitoring row. Part of the purge transaction's
    /// ordered deletion sequence.
    pub async fn delete_for_document(
        conn: &mut PgConnection,
        document_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM monitored_files WHERE document_id = $1")
            .bind(document_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
