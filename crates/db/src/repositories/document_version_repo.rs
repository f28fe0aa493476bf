//! Repository for the `document_versions` table (the version ledger).
//!
//! Version rows are immutable: there are no UPDATE statements here, and
//! the only DELETE is the purge path that removes a whole document.

use docguard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::document_version::DocumentVersion;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, document_id, blob_key, version_number, created_at";

/// Provides append and read operations for document versions.
pub struct DocumentVersionRepo;

impl DocumentVersionRepo {
    // ── Appending ────────────────────────────────────────────────────

    /// Append the next version for a document, auto-assigning
    /// `max(version_number) + 1` (1 when no versions exist).
    ///
    /// Must run inside a transaction that has already locked the
    /// document row, so two concurrent appends cannot both read the
    /// same max.
    pub async fn append(
        conn: &mut PgConnection,
        document_id: DbId,
        blob_key: &str,
    ) -> Result<DocumentVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO document_versions (document_id, blob_key, version_number)
             VALUES (
                $1,
                $2,
                (SELECT COALESCE(MAX(version_number), 0) + 1 FROM document_versions WHERE document_id = $1)
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentVersion>(&query)
            .bind(document_id)
            .bind(blob_key)
            .fetch_one(conn)
            .await
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Find a version by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DocumentVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM document_versions WHERE id = $1");
        sqlx::query_as::<_, DocumentVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions for a document, most recent first.
    pub async fn list_by_document(
        pool: &PgPool,
        document_id: DbId,
    ) -> Result<Vec<DocumentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM document_versions
             WHERE document_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, DocumentVersion>(&query)
            .bind(document_id)
            .fetch_all(pool)
            .await
    }

    /// Every blob key referenced by a document's version history.
    ///
    /// The purge flow collects these inside its transaction before the
    /// rows disappear, then releases the blobs after commit.
    pub async fn blob_keys_for_document(
        conn: &mut PgConnection,
        document_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT blob_key FROM document_versions \
             WHERE document_id = $1 ORDER BY version_number",
        )
        .bind(document_id)
        .fetch_all(conn)
        .await
    }

    // ── Purge ────────────────────────────────────────────────────────

    /// Delete every version row for a document. First step of the
    /// purge transaction's ordered deletion sequence.
    pub async fn delete_for_document(
        conn: &mut PgConnection,
        document_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM document_versions WHERE document_id = $1")
            .bind(document_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
