//! Repository for the `activity_logs` table.
//!
//! Append-only: rows are inserted and read, never updated or deleted.

use docguard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, action, document_id, timestamp";

/// Provides insert and query operations for activity events.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Record an activity event inside a caller-owned transaction, so
    /// the event commits together with the mutation it describes.
    pub async fn record(
        conn: &mut PgConnection,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action, document_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(input.document_id)
            .fetch_one(conn)
            .await
    }

    /// Record an activity event directly against the pool (for events
    /// with no accompanying metadata mutation, e.g. login/logout).
    pub async fn record_standalone(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::record(&mut conn, input).await
    }

    /// A user's most recent activity, newest first.
    pub async fn list_recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE user_id = $1
             ORDER BY timestamp DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// All events referencing a document, newest first.
    pub async fn list_for_document(
        pool: &PgPool,
        document_id: DbId,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE document_id = $1
             ORDER BY timestamp DESC, id DESC"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(document_id)
            .fetch_all(pool)
            .await
    }

    /// Count events by user and action (admin analytics).
    pub async fn count_for_user_action(
        pool: &PgPool,
        user_id: DbId,
        action: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM activity_logs WHERE user_id = $1 AND action = $2",
        )
        .bind(user_id)
        .bind(action)
        .fetch_one(pool)
        .await
    }
}
