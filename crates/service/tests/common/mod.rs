//! Shared helpers for service integration tests.
//!
//! Builds the document and integrity services over a temp-directory
//! blob store and seeds the user/category/folder rows the flows need.

#![allow(dead_code)]

use std::sync::Arc;

use sqlx::PgPool;
use tokio::io::AsyncReadExt;

use docguard_db::models::category::CreateCategory;
use docguard_db::models::folder::{CreateFolder, Folder};
use docguard_db::models::user::{CreateUser, User};
use docguard_db::repositories::{CategoryRepo, FolderRepo, UserRepo};
use docguard_service::{DocumentService, IntegrityService};
use docguard_storage::{BlobReader, LocalContentStore};

/// Services plus the temp directory backing the blob store (kept alive
/// for the duration of the test).
pub struct TestEnv {
    pub service: DocumentService,
    pub integrity: IntegrityService,
    pub store_dir: tempfile::TempDir,
}

/// Build both services over a fresh temp-directory store.
pub async fn build_env(pool: PgPool) -> TestEnv {
    let store_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(
        LocalContentStore::open_root(store_dir.path())
            .await
            .unwrap(),
    );
    TestEnv {
        service: DocumentService::new(pool.clone(), store.clone()),
        integrity: IntegrityService::new(pool, store),
        store_dir,
    }
}

/// Insert a standard-role user.
pub async fn seed_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: "standard".to_string(),
        },
    )
    .await
    .unwrap()
}

/// Insert an admin-role user.
pub async fn seed_admin(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap()
}

/// Insert a category plus one folder inside it.
pub async fn seed_folder(pool: &PgPool, owner_id: i64, locked: bool) -> Folder {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            name: "General".to_string(),
            created_by: owner_id,
        },
    )
    .await
    .unwrap();
    FolderRepo::create(
        pool,
        &CreateFolder {
            name: "Inbox".to_string(),
            category_id: category.id,
            is_locked: Some(locked),
        },
    )
    .await
    .unwrap()
}

/// Drain a blob reader into memory.
pub async fn read_all(mut reader: BlobReader) -> Vec<u8> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await.unwrap();
    buf
}
