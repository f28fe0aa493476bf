//! Repository for the `documents` table.

use docguard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::document::{CreateDocument, Document};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, folder_id, owner_id, current_blob_key, \
    uploaded_at, is_deleted, deleted_at";

/// Provides CRUD and lifecycle operations for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new document row.
    ///
    /// Runs on a caller-owned connection so the upload flow can commit
    /// the document, its version 1, and its hash record together.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (name, folder_id, owner_id, current_blob_key)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(&input.name)
            .bind(input.folder_id)
            .bind(input.owner_id)
            .bind(&input.current_blob_key)
            .fetch_one(conn)
            .await
    }

    /// Find a document by ID regardless of deleted status (trash and
    /// purge flows need to see trashed rows).
    pub async fn find_by_id_any(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a document row and lock it for the duration of the
    /// caller's transaction.
    ///
    /// Every mutating operation on a document goes through this lock,
    /// so concurrent appends against the same document serialize and
    /// can never read the same max version number. Includes trashed
    /// rows; the caller checks lifecycle state after locking.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List a user's documents, newest first. Excludes soft-deleted rows.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE owner_id = $1 AND deleted_at IS NULL
             ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// A user's most recent uploads (dashboard feed).
    pub async fn recent_uploads(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE owner_id = $1 AND deleted_at IS NULL
             ORDER BY uploaded_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(owner_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List the documents in a folder. Excludes soft-deleted rows.
    pub async fn list_by_folder(
        pool: &PgPool,
        folder_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE folder_id = $1 AND deleted_at IS NULL
             ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(folder_id)
            .fetch_all(pool)
            .await
    }

    /// List soft-deleted documents for a user (trash view), most
    /// recently deleted first.
    pub async fn list_trashed_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE owner_id = $1 AND deleted_at IS NOT NULL
             ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List every soft-deleted document across all users (admin trash
    /// screen), most recently deleted first.
    pub async fn list_trashed_all(pool: &PgPool) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE deleted_at IS NOT NULL
             ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, Document>(&query).fetch_all(pool).await
    }

    // ── Current blob pointer ─────────────────────────────────────────

    /// Repoint the document's current blob. Only ever called inside a
    /// version-append transaction, after the new version row exists.
    pub async fn set_current_blob(
        conn: &mut PgConnection,
        id: DbId,
        blob_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE documents SET current_blob_key = $2 WHERE id = $1")
            .bind(id)
            .bind(blob_key)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Soft-delete a document. Returns `true` if a live row was marked.
    pub async fn soft_delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE documents SET is_deleted = TRUE, deleted_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted document. Returns `true` if a row was restored.
    pub async fn restore(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE documents SET is_deleted = FALSE, deleted_at = NULL \
             WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the document row itself. Final step of the purge
    /// transaction, after versions and the hash record are gone.
    pub async fn delete_row(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
