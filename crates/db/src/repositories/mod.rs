//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` for standalone reads, or `&mut PgConnection` where
//! the call must compose into a caller-owned transaction.

pub mod activity_log_repo;
pub mod category_repo;
pub mod document_repo;
pub mod document_version_repo;
pub mod file_hash_repo;
pub mod folder_repo;
pub mod monitored_file_repo;
pub mod usage_stat_repo;
pub mod user_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use category_repo::CategoryRepo;
pub use document_repo::DocumentRepo;
pub use document_version_repo::DocumentVersionRepo;
pub use file_hash_repo::FileHashRepo;
pub use folder_repo::FolderRepo;
pub use monitored_file_repo::MonitoredFileRepo;
pub use usage_stat_repo::UsageStatRepo;
pub use user_repo::UserRepo;
