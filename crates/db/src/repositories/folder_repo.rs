//! Repository for the `folders` table.

use docguard_core::types::DbId;
use sqlx::PgPool;

use crate::models::folder::{CreateFolder, Folder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category_id, is_locked, created_at";

/// Provides CRUD operations for folders.
pub struct FolderRepo;

impl FolderRepo {
    /// Insert a new folder. `is_locked` defaults to `false`.
    pub async fn create(pool: &PgPool, input: &CreateFolder) -> Result<Folder, sqlx::Error> {
        let query = format!(
            "INSERT INTO folders (name, category_id, is_locked)
             VALUES ($1, $2, COALESCE($3, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Folder>(&query)
            .bind(&input.name)
            .bind(input.category_id)
            .bind(input.is_locked)
            .fetch_one(pool)
            .await
    }

    /// Find a folder by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders WHERE id = $1");
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock or unlock a folder. Returns `true` if a row was updated.
    pub async fn set_locked(pool: &PgPool, id: DbId, locked: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE folders SET is_locked = $2 WHERE id = $1")
            .bind(id)
            .bind(locked)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
