//! Repository for the `usage_stats` table.

use docguard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::usage_stat::{CreateUsageStat, UsageCount, UsageStat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, document_id, accessed_by, action, accessed_at";

/// Provides insert and aggregation operations for usage statistics.
pub struct UsageStatRepo;

impl UsageStatRepo {
    /// Record a usage event inside a caller-owned transaction.
    pub async fn record(
        conn: &mut PgConnection,
        input: &CreateUsageStat,
    ) -> Result<UsageStat, sqlx::Error> {
        let query = format!(
            "INSERT INTO usage_stats (document_id, accessed_by, action)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UsageStat>(&query)
            .bind(input.document_id)
            .bind(input.accessed_by)
            .bind(&input.action)
            .fetch_one(conn)
            .await
    }

    /// Per-action access counts for a document.
    pub async fn counts_for_document(
        pool: &PgPool,
        document_id: DbId,
    ) -> Result<Vec<UsageCount>, sqlx::Error> {
        sqlx::query_as::<_, UsageCount>(
            "SELECT action, COUNT(*) AS count \
             FROM usage_stats \
             WHERE document_id = $1 \
             GROUP BY action \
             ORDER BY count DESC",
        )
        .bind(document_id)
        .fetch_all(pool)
        .await
    }

    /// Delete a document's usage rows. Part of the purge transaction's
    /// ordered deletion sequence.
    pub async fn delete_for_document(
        conn: &mut PgConnection,
        document_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM usage_stats WHERE document_id = $1")
            .bind(document_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
