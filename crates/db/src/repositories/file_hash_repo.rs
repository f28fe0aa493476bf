//! Repository for the `file_hashes` table.

use docguard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::file_hash::FileHash;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, document_id, hash_value, last_checked";

/// Provides upsert and read operations for per-document hash records.
pub struct FileHashRepo;

impl FileHashRepo {
    /// Insert or refresh the hash record for a document.
    ///
    /// Runs inside the same transaction as the current-blob update, so
    /// a reader that observes the new blob also observes its hash.
    pub async fn upsert(
        conn: &mut PgConnection,
        document_id: DbId,
        hash_value: &str,
    ) -> Result<FileHash, sqlx::Error> {
        let query = format!(
            "INSERT INTO file_hashes (document_id, hash_value)
             VALUES ($1, $2)
             ON CONFLICT (document_id)
             DO UPDATE SET hash_value = EXCLUDED.hash_value, last_checked = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileHash>(&query)
            .bind(document_id)
            .bind(hash_value)
            .fetch_one(conn)
            .await
    }

    /// Find the hash record for a document.
    pub async fn find_by_document(
        pool: &PgPool,
        document_id: DbId,
    ) -> Result<Option<FileHash>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM file_hashes WHERE document_id = $1");
        sqlx::query_as::<_, FileHash>(&query)
            .bind(document_id)
            .fetch_optional(pool)
            .await
    }

    /// Bump `last_checked` after an integrity re-check. The stored
    /// hash is never modified by a check, even on mismatch.
    pub async fn touch(pool: &PgPool, document_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE file_hashes SET last_checked = NOW() WHERE document_id = $1")
            .bind(document_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the hash record. Second step of the purge transaction's
    /// ordered deletion sequence.
    pub async fn delete_for_document(
        conn: &mut PgConnection,
        document_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM file_hashes WHERE document_id = $1")
            .bind(document_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
