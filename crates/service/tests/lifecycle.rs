//! Integration tests for the trash lifecycle: soft delete, restore,
//! purge, and the guards around them.

mod common;

use assert_matches::assert_matches;
use common::{build_env, read_all, seed_admin, seed_folder, seed_user};
use docguard_core::error::CoreError;
use docguard_db::repositories::FolderRepo;
use docguard_service::ServiceError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: soft delete moves the document to trash and keeps history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn soft_delete_preserves_history(pool: PgPool) {
    let env = build_env(pool.clone()).await;
    let user = seed_user(&pool, "alice").await;

    let doc = env
        .service
        .upload(user.id, None, Some("keep.txt"), b"one")
        .await
        .unwrap();
    env.service
        .append_version(user.id, doc.id, b"two")
        .await
        .unwrap();

    let trashed = env.service.soft_delete(user.id, doc.id).await.unwrap();
    assert!(trashed.is_deleted);
    assert!(trashed.deleted_at.is_some());

    // Gone from live listings, visible in the trash.
    assert!(env.service.list_documents(user.id).await.unwrap().is_empty());
    let trash = env.service.list_trashed(user.id).await.unwrap();
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].id, doc.id);

    // The ledger and hash record are untouched.
    let versions = env.service.list_versions(user.id, doc.id).await.unwrap();
    assert_eq!(versions.len(), 2);
    let hash = env.service.hash_record(user.id, doc.id).await.unwrap();
    assert_eq!(
        hash.hash_value.trim(),
        docguard_core::hashing::sha256_hex(b"two")
    );
}

// ---------------------------------------------------------------------------
// Test: writes and downloads are rejected while trashed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn trashed_document_rejects_writes(pool: PgPool) {
    let env = build_env(pool.clone()).await;
    let user = seed_user(&pool, "alice").await;

    let doc = env
        .service
        .upload(user.id, None, Some("t.txt"), b"content")
        .await
        .unwrap();
    env.service.soft_delete(user.id, doc.id).await.unwrap();

    let err = env.service.append_version(user.id, doc.id, b"more").await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::InvalidState(_))));

    let versions = env.service.list_versions(user.id, doc.id).await.unwrap();
    let err = env.service.restore_version(user.id, versions[0].id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::InvalidState(_))));

    let err = env.service.download(user.id, doc.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::InvalidState(_))));

    // Double delete is also invalid.
    let err = env.service.soft_delete(user.id, doc.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::InvalidState(_))));

    // No version appeared through any failed path.
    assert_eq!(versions.len(), 1);
    let after = env.service.list_versions(user.id, doc.id).await.unwrap();
    assert_eq!(after.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: restore from trash reactivates with content intact
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn restore_from_trash_reactivates(pool: PgPool) {
    let env = build_env(pool.clone()).await;
    let user = seed_user(&pool, "alice").await;

    let doc = env
        .service
        .upload(user.id, None, Some("back.txt"), b"payload")
        .await
        .unwrap();
    env.service.soft_delete(user.id, doc.id).await.unwrap();

    let restored = env.service.restore_from_trash(user.id, doc.id).await.unwrap();
    assert!(!restored.is_deleted);
    assert!(restored.deleted_at.is_none());

    // Restoring an already-live document is invalid.
    let err = env.service.restore_from_trash(user.id, doc.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::InvalidState(_))));

    // Content still downloads after the round trip.
    let (_, reader) = env.service.download(user.id, doc.id).await.unwrap();
    assert_eq!(read_all(reader).await, b"payload");
}

// ---------------------------------------------------------------------------
// Test: purge removes every row and blob; activity rows survive
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn purge_removes_rows_and_blobs(pool: PgPool) {
    let env = build_env(pool.clone()).await;
    let user = seed_user(&pool, "alice").await;

    let doc = env
        .service
        .upload(user.id, None, Some("gone.txt"), b"v1")
        .await
        .unwrap();
    env.service
        .append_version(user.id, doc.id, b"v2")
        .await
        .unwrap();
    let versions = env.service.list_versions(user.id, doc.id).await.unwrap();
    let blob_keys: Vec<String> = versions.iter().map(|v| v.blob_key.clone()).collect();

    // Purge requires the document to be in the trash first.
    let err = env.service.purge(user.id, doc.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::InvalidState(_))));

    env.service.soft_delete(user.id, doc.id).await.unwrap();
    env.service.purge(user.id, doc.id).await.unwrap();

    let err = env.service.get_document(user.id, doc.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::NotFound { .. })));
    assert!(env.service.list_trashed(user.id).await.unwrap().is_empty());

    // Every blob for every version is gone from the store.
    for key in &blob_keys {
        assert!(!env.store_dir.path().join(key).exists());
    }

    // Activity rows survive; document-scoped rows lost their reference
    // and the purge itself recorded a standalone delete event.
    let events = env.service.recent_activity(user.id, 20).await.unwrap();
    assert!(events.iter().all(|e| e.document_id.is_none()));
    assert!(events
        .iter()
        .any(|e| e.action == "delete" && e.document_id.is_none()));
    assert!(events.iter().any(|e| e.action == "upload"));
}

// ---------------------------------------------------------------------------
// Test: locked folders reject uploads and appends
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn locked_folder_rejects_writes(pool: PgPool) {
    let env = build_env(pool.clone()).await;
    let user = seed_user(&pool, "alice").await;
    let folder = seed_folder(&pool, user.id, true).await;

    let err = env
        .service
        .upload(user.id, Some(folder.id), Some("x.txt"), b"data")
        .await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::PermissionDenied(_))));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unlocked_folder_accepts_uploads(pool: PgPool) {
    let env = build_env(pool.clone()).await;
    let user = seed_user(&pool, "alice").await;
    let folder = seed_folder(&pool, user.id, false).await;

    let doc = env
        .service
        .upload(user.id, Some(folder.id), Some("x.txt"), b"data")
        .await
        .unwrap();
    assert_eq!(doc.folder_id, Some(folder.id));

    env.service
        .append_version(user.id, doc.id, b"more data")
        .await
        .unwrap();

    let filed = env.service.list_by_folder(folder.id).await.unwrap();
    assert_eq!(filed.len(), 1);
    assert_eq!(filed[0].id, doc.id);

    // Locking the folder afterwards blocks further versions.
    FolderRepo::set_locked(&pool, folder.id, true).await.unwrap();
    let err = env.service.append_version(user.id, doc.id, b"late").await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::PermissionDenied(_))));

    let err = env.service.list_by_folder(999_999).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::NotFound { .. })));
}

// ---------------------------------------------------------------------------
// Test: ownership guards on lifecycle operations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn lifecycle_is_owner_only(pool: PgPool) {
    let env = build_env(pool.clone()).await;
    let alice = seed_user(&pool, "alice").await;
    let mallory = seed_user(&pool, "mallory").await;

    let doc = env
        .service
        .upload(alice.id, None, Some("a.txt"), b"data")
        .await
        .unwrap();

    let err = env.service.soft_delete(mallory.id, doc.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::PermissionDenied(_))));

    env.service.soft_delete(alice.id, doc.id).await.unwrap();

    let err = env.service.restore_from_trash(mallory.id, doc.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::PermissionDenied(_))));

    let err = env.service.purge(mallory.id, doc.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::PermissionDenied(_))));

    // The document is still sitting in alice's trash.
    assert_eq!(env.service.list_trashed(alice.id).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: the all-users trash listing is admin-gated
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn trash_listing_across_users_requires_admin(pool: PgPool) {
    let env = build_env(pool.clone()).await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let admin = seed_admin(&pool, "root").await;

    for (user, name) in [(&alice, "a.txt"), (&bob, "b.txt")] {
        let doc = env
            .service
            .upload(user.id, None, Some(name), b"data")
            .await
            .unwrap();
        env.service.soft_delete(user.id, doc.id).await.unwrap();
    }

    let err = env.service.list_trashed_all(alice.id).await;
    assert_matches!(err, Err(ServiceError::Core(CoreError::PermissionDenied(_))));

    let all = env.service.list_trashed_all(admin.id).await.unwrap();
    assert_eq!(all.len(), 2);
}
