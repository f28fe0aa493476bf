//! User entity model and DTOs.
//!
//! Authentication lives outside this system; the row exists so
//! ownership and activity foreign keys resolve, and to carry the role
//! flag.

use docguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// `"admin"` or `"standard"`; parse with `docguard_core::roles::UserRole`.
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub role: String,
}
