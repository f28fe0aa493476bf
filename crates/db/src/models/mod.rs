//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts, where rows are created
//!   from caller input
//!
//! Mutations go through dedicated repository methods rather than
//! catch-all update DTOs; most of these rows are append-only.

pub mod activity_log;
pub mod category;
pub mod document;
pub mod document_version;
pub mod file_hash;
pub mod folder;
pub mod monitored_file;
pub mod usage_stat;
pub mod user;
