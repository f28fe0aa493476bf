//! Document lifecycle and version ledger operations.
//!
//! Every mutating operation runs as a single transaction with the
//! document row locked `FOR UPDATE`: version-number assignment, the
//! current-blob pointer update, and the hash-record refresh commit
//! together or not at all. Operations on different documents share no
//! locks.
//!
//! Blob writes happen before the metadata transaction begins, so the
//! transaction never commits a reference to a blob that is not already
//! durable. A blob orphaned by a failed transaction is acceptable; a
//! committed row pointing at a missing blob is not.

use std::str::FromStr;
use std::sync::Arc;

use docguard_core::activity::ActionKind;
use docguard_core::error::CoreError;
use docguard_core::lifecycle::{ensure_active, ensure_trashed};
use docguard_core::roles::UserRole;
use docguard_core::types::DbId;
use docguard_db::models::activity_log::{ActivityLog, CreateActivityLog};
use docguard_db::models::document::{CreateDocument, Document};
use docguard_db::models::document_version::DocumentVersion;
use docguard_db::models::file_hash::FileHash;
use docguard_db::models::monitored_file::MonitoredFile;
use docguard_db::models::usage_stat::{CreateUsageStat, UsageCount};
use docguard_db::repositories::{
    ActivityLogRepo, DocumentRepo, DocumentVersionRepo, FileHashRepo, FolderRepo,
    MonitoredFileRepo, UsageStatRepo, UserRepo,
};
use docguard_db::DbPool;
use docguard_storage::digest::digest_blob;
use docguard_storage::{BlobReader, ContentStore};

use crate::error::{ServiceError, ServiceResult};

/// Outcome of restoring an old version: the new head of the ledger
/// plus the source version number, for audit messaging.
#[derive(Debug)]
pub struct RestoreOutcome {
    pub document: Document,
    pub new_version: DocumentVersion,
    pub source_version_number: i32,
}

/// Collaborator-facing document operations.
///
/// Cheaply cloneable; the pool and store are shared handles.
#[derive(Clone)]
pub struct DocumentService {
    pool: DbPool,
    store: Arc<dyn ContentStore>,
}

impl DocumentService {
    pub fn new(pool: DbPool, store: Arc<dyn ContentStore>) -> Self {
        Self { pool, store }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    // ── Uploads and versioning ───────────────────────────────────────

    /// Upload a new document.
    ///
    /// Stores the blob durably, digests it, then atomically creates
    /// the document, its version-1 record, its hash record, and its
    /// monitoring flag, and records an `upload` activity event.
    ///
    /// `name` doubles as the display name and the source of the blob
    /// key's file extension; when absent the document is "Untitled".
    /// A locked target folder rejects the upload.
    pub async fn upload(
        &self,
        owner_id: DbId,
        folder_id: Option<DbId>,
        name: Option<&str>,
        bytes: &[u8],
    ) -> ServiceResult<Document> {
        if bytes.is_empty() {
            return Err(CoreError::Validation("Upload payload is empty".into()).into());
        }

        UserRepo::find_by_id(&self.pool, owner_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: owner_id,
            })?;

        if let Some(folder_id) = folder_id {
            self.ensure_folder_unlocked(folder_id).await?;
        }

        let display_name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => "Untitled".to_string(),
        };

        // Blob first: durable before any metadata references it.
        let blob_key = self.store.put(name, bytes).await?;
        let hash = digest_blob(self.store.as_ref(), &blob_key).await?;

        let mut tx = self.pool.begin().await?;
        let document = DocumentRepo::create(
            &mut *tx,
            &CreateDocument {
                name: display_name,
                folder_id,
                owner_id,
                current_blob_key: blob_key.clone(),
            },
        )
        .await?;
        let version = DocumentVersionRepo::append(&mut *tx, document.id, &blob_key).await?;
        FileHashRepo::upsert(&mut *tx, document.id, &hash).await?;
        MonitoredFileRepo::ensure(&mut *tx, document.id).await?;
        ActivityLogRepo::record(
            &mut *tx,
            &CreateActivityLog {
                user_id: owner_id,
                action: ActionKind::Upload.as_str().into(),
                document_id: Some(document.id),
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            document_id = document.id,
            version = version.version_number,
            owner_id,
            "Uploaded document"
        );
        Ok(document)
    }

    /// Append a new version to an existing document.
    ///
    /// Owner-only, Active-only. The new version gets the next number
    /// in the ledger; the current-blob pointer and hash record move
    /// with it in the same transaction.
    pub async fn append_version(
        &self,
        caller_id: DbId,
        document_id: DbId,
        bytes: &[u8],
    ) -> ServiceResult<(Document, DocumentVersion)> {
        if bytes.is_empty() {
            return Err(CoreError::Validation("Upload payload is empty".into()).into());
        }

        // Pre-flight checks before paying for the blob write; the
        // authoritative checks repeat under the row lock below.
        let doc = self.find_owned_any(caller_id, document_id).await?;
        ensure_active(doc.state(), document_id)?;
        if let Some(folder_id) = doc.folder_id {
            self.ensure_folder_unlocked(folder_id).await?;
        }

        let blob_key = self.store.put(Some(&doc.name), bytes).await?;
        let hash = digest_blob(self.store.as_ref(), &blob_key).await?;

        let (document, version) = self
            .append_locked(caller_id, document_id, &blob_key, &hash)
            .await?;

        tracing::info!(
            document_id,
            version = version.version_number,
            "Appended document version"
        );
        Ok((document, version))
    }

    /// Restore an old version as the new current version.
    ///
    /// Appends a new, higher-numbered version pointing at the old
    /// content -- history is never rewritten, and restoring the
    /// current version is legal (it simply duplicates it).
    pub async fn restore_version(
        &self,
        caller_id: DbId,
        version_id: DbId,
    ) -> ServiceResult<RestoreOutcome> {
        let source = DocumentVersionRepo::find_by_id(&self.pool, version_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "DocumentVersion",
                id: version_id,
            })?;

        let doc = self.find_owned_any(caller_id, source.document_id).await?;
        ensure_active(doc.state(), doc.id)?;

        // Re-digest the source blob; a missing blob surfaces here as a
        // storage failure before any metadata changes.
        let hash = digest_blob(self.store.as_ref(), &source.blob_key).await?;

        let (document, new_version) = self
            .append_locked(caller_id, source.document_id, &source.blob_key, &hash)
            .await?;

        tracing::info!(
            document_id = document.id,
            source_version = source.version_number,
            new_version = new_version.version_number,
            "Restored document version"
        );
        Ok(RestoreOutcome {
            document,
            new_version,
            source_version_number: source.version_number,
        })
    }

    /// Shared append transaction: lock the document row, re-check
    /// state, append the version, repoint the current blob, refresh
    /// the hash record, and record a `modify` event.
    async fn append_locked(
        &self,
        caller_id: DbId,
        document_id: DbId,
        blob_key: &str,
        hash: &str,
    ) -> ServiceResult<(Document, DocumentVersion)> {
        let mut tx = self.pool.begin().await?;

        let doc = DocumentRepo::lock_for_update(&mut *tx, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Document",
                id: document_id,
            })?;
        ensure_owner(&doc, caller_id)?;
        ensure_active(doc.state(), document_id)?;

        let version = DocumentVersionRepo::append(&mut *tx, document_id, blob_key).await?;
        DocumentRepo::set_current_blob(&mut *tx, document_id, blob_key).await?;
        FileHashRepo::upsert(&mut *tx, document_id, hash).await?;
        ActivityLogRepo::record(
            &mut *tx,
            &CreateActivityLog {
                user_id: caller_id,
                action: ActionKind::Modify.as_str().into(),
                document_id: Some(document_id),
            },
        )
        .await?;

        tx.commit().await?;

        let mut updated = doc;
        updated.current_blob_key = blob_key.to_string();
        Ok((updated, version))
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch a document snapshot (live or trashed) the caller owns.
    pub async fn get_document(&self, caller_id: DbId, document_id: DbId) -> ServiceResult<Document> {
        self.find_owned_any(caller_id, document_id).await
    }

    /// List the version ledger, most recent first.
    pub async fn list_versions(
        &self,
        caller_id: DbId,
        document_id: DbId,
    ) -> ServiceResult<Vec<DocumentVersion>> {
        self.find_owned_any(caller_id, document_id).await?;
        Ok(DocumentVersionRepo::list_by_document(&self.pool, document_id).await?)
    }

    /// The current hash record for a document.
    pub async fn hash_record(&self, caller_id: DbId, document_id: DbId) -> ServiceResult<FileHash> {
        self.find_owned_any(caller_id, document_id).await?;
        FileHashRepo::find_by_document(&self.pool, document_id)
            .await?
            .ok_or(
                CoreError::NotFound {
                    entity: "FileHash",
                    id: document_id,
                }
                .into(),
            )
    }

    /// A user's live documents, newest first.
    pub async fn list_documents(&self, owner_id: DbId) -> ServiceResult<Vec<Document>> {
        Ok(DocumentRepo::list_by_owner(&self.pool, owner_id).await?)
    }

    /// A user's trashed documents, most recently deleted first.
    pub async fn list_trashed(&self, owner_id: DbId) -> ServiceResult<Vec<Document>> {
        Ok(DocumentRepo::list_trashed_by_owner(&self.pool, owner_id).await?)
    }

    /// Every trashed document across all users. Admin-only (backs the
    /// admin trash screen).
    pub async fn list_trashed_all(&self, caller_id: DbId) -> ServiceResult<Vec<Document>> {
        if !self.caller_is_admin(caller_id).await? {
            return Err(ServiceError::Core(CoreError::PermissionDenied(format!(
                "User {caller_id} is not an admin"
            ))));
        }
        Ok(DocumentRepo::list_trashed_all(&self.pool).await?)
    }

    /// Live documents filed in a folder, newest first.
    pub async fn list_by_folder(&self, folder_id: DbId) -> ServiceResult<Vec<Document>> {
        FolderRepo::find_by_id(&self.pool, folder_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Folder",
                id: folder_id,
            })?;
        Ok(DocumentRepo::list_by_folder(&self.pool, folder_id).await?)
    }

    /// All activity events referencing a document, newest first.
    pub async fn document_activity(
        &self,
        caller_id: DbId,
        document_id: DbId,
    ) -> ServiceResult<Vec<ActivityLog>> {
        self.find_owned_any(caller_id, document_id).await?;
        Ok(ActivityLogRepo::list_for_document(&self.pool, document_id).await?)
    }

    /// Turn integrity monitoring on or off for a document.
    pub async fn set_monitored(
        &self,
        caller_id: DbId,
        document_id: DbId,
        monitored: bool,
    ) -> ServiceResult<MonitoredFile> {
        self.find_owned_any(caller_id, document_id).await?;
        MonitoredFileRepo::set_monitored(&self.pool, document_id, monitored).await?;
        MonitoredFileRepo::find_by_document(&self.pool, document_id)
            .await?
            .ok_or(
                CoreError::NotFound {
                    entity: "MonitoredFile",
                    id: document_id,
                }
                .into(),
            )
    }

    /// A user's most recent uploads (dashboard feed).
    pub async fn recent_uploads(&self, owner_id: DbId, limit: i64) -> ServiceResult<Vec<Document>> {
        Ok(DocumentRepo::recent_uploads(&self.pool, owner_id, limit).await?)
    }

    /// A user's most recent activity events (dashboard feed).
    pub async fn recent_activity(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> ServiceResult<Vec<ActivityLog>> {
        Ok(ActivityLogRepo::list_recent_for_user(&self.pool, user_id, limit).await?)
    }

    /// Per-action usage counts for a document.
    pub async fn usage_counts(
        &self,
        caller_id: DbId,
        document_id: DbId,
    ) -> ServiceResult<Vec<UsageCount>> {
        self.find_owned_any(caller_id, document_id).await?;
        Ok(UsageStatRepo::counts_for_document(&self.pool, document_id).await?)
    }

    /// Open the current blob for reading and record the access.
    ///
    /// Owner-only, Active-only. Records a `download` activity event
    /// and a usage stat.
    pub async fn download(
        &self,
        caller_id: DbId,
        document_id: DbId,
    ) -> ServiceResult<(Document, BlobReader)> {
        let doc = self.find_owned_any(caller_id, document_id).await?;
        ensure_active(doc.state(), document_id)?;

        let reader = self.store.open(&doc.current_blob_key).await?;

        let mut tx = self.pool.begin().await?;
        ActivityLogRepo::record(
            &mut *tx,
            &CreateActivityLog {
                user_id: caller_id,
                action: ActionKind::Download.as_str().into(),
                document_id: Some(document_id),
            },
        )
        .await?;
        UsageStatRepo::record(
            &mut *tx,
            &CreateUsageStat {
                document_id,
                accessed_by: caller_id,
                action: ActionKind::Download.as_str().into(),
            },
        )
        .await?;
        tx.commit().await?;

        Ok((doc, reader))
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Soft-delete a document (Active → Trashed).
    ///
    /// Blobs and version history are untouched and stay hashable and
    /// restorable while the document sits in the trash.
    pub async fn soft_delete(&self, caller_id: DbId, document_id: DbId) -> ServiceResult<Document> {
        let mut tx = self.pool.begin().await?;

        let doc = DocumentRepo::lock_for_update(&mut *tx, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Document",
                id: document_id,
            })?;
        ensure_owner(&doc, caller_id)?;
        ensure_active(doc.state(), document_id)?;

        DocumentRepo::soft_delete(&mut *tx, document_id).await?;
        ActivityLogRepo::record(
            &mut *tx,
            &CreateActivityLog {
                user_id: caller_id,
                action: ActionKind::Delete.as_str().into(),
                document_id: Some(document_id),
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(document_id, "Moved document to trash");
        self.find_owned_any(caller_id, document_id).await
    }

    /// Restore a document from the trash (Trashed → Active).
    pub async fn restore_from_trash(
        &self,
        caller_id: DbId,
        document_id: DbId,
    ) -> ServiceResult<Document> {
        let mut tx = self.pool.begin().await?;

        let doc = DocumentRepo::lock_for_update(&mut *tx, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Document",
                id: document_id,
            })?;
        ensure_owner(&doc, caller_id)?;
        ensure_trashed(doc.state(), document_id)?;

        DocumentRepo::restore(&mut *tx, document_id).await?;
        ActivityLogRepo::record(
            &mut *tx,
            &CreateActivityLog {
                user_id: caller_id,
                action: ActionKind::Modify.as_str().into(),
                document_id: Some(document_id),
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(document_id, "Restored document from trash");
        self.find_owned_any(caller_id, document_id).await
    }

    /// Permanently delete a trashed document.
    ///
    /// Deletes, in order and in one transaction: version records, the
    /// hash record, the monitoring flag, usage stats, and finally the
    /// document row (activity rows survive with their document
    /// reference nulled by the database). Only after the transaction
    /// commits are the blobs released -- a failure there leaves
    /// orphaned blobs, which is tolerable; the reverse order would
    /// leave metadata pointing at missing content, which is not.
    pub async fn purge(&self, caller_id: DbId, document_id: DbId) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        let doc = DocumentRepo::lock_for_update(&mut *tx, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Document",
                id: document_id,
            })?;
        ensure_owner(&doc, caller_id)?;
        ensure_trashed(doc.state(), document_id)?;

        // Collect every referenced blob while the rows still exist.
        // The current blob equals the newest version's blob, so the
        // version list covers it.
        let blob_keys = DocumentVersionRepo::blob_keys_for_document(&mut *tx, document_id).await?;

        DocumentVersionRepo::delete_for_document(&mut *tx, document_id).await?;
        FileHashRepo::delete_for_document(&mut *tx, document_id).await?;
        MonitoredFileRepo::delete_for_document(&mut *tx, document_id).await?;
        UsageStatRepo::delete_for_document(&mut *tx, document_id).await?;
        DocumentRepo::delete_row(&mut *tx, document_id).await?;

        tx.commit().await?;

        // Release the blobs. Removal is idempotent; a failure here is
        // logged and leaves a reclaimable orphan.
        for key in &blob_keys {
            if let Err(e) = self.store.remove(key).await {
                tracing::warn!(blob_key = %key, error = %e, "Failed to remove blob during purge");
            }
        }

        // The document row is gone, so the event carries no reference.
        ActivityLogRepo::record_standalone(
            &self.pool,
            &CreateActivityLog {
                user_id: caller_id,
                action: ActionKind::Delete.as_str().into(),
                document_id: None,
            },
        )
        .await?;

        tracing::info!(document_id, blobs = blob_keys.len(), "Purged document");
        Ok(())
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Resolve a document (live or trashed) and check ownership.
    ///
    /// An id that resolves to nothing is `NotFound`; a document owned
    /// by someone else is `PermissionDenied`.
    async fn find_owned_any(&self, caller_id: DbId, document_id: DbId) -> ServiceResult<Document> {
        let doc = DocumentRepo::find_by_id_any(&self.pool, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Document",
                id: document_id,
            })?;
        ensure_owner(&doc, caller_id)?;
        Ok(doc)
    }

    /// Whether the caller holds the admin role.
    async fn caller_is_admin(&self, caller_id: DbId) -> ServiceResult<bool> {
        let user = UserRepo::find_by_id(&self.pool, caller_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: caller_id,
            })?;
        let role = UserRole::from_str(&user.role)?;
        Ok(role.is_admin())
    }

    /// Reject writes into a locked folder.
    async fn ensure_folder_unlocked(&self, folder_id: DbId) -> ServiceResult<()> {
        let folder = FolderRepo::find_by_id(&self.pool, folder_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Folder",
                id: folder_id,
            })?;
        if folder.is_locked {
            return Err(ServiceError::Core(CoreError::PermissionDenied(format!(
                "Folder {folder_id} is locked"
            ))));
        }
        Ok(())
    }
}

/// Guard: the caller must be the owning user.
fn ensure_owner(doc: &Document, caller_id: DbId) -> Result<(), CoreError> {
    if doc.owner_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied(format!(
            "Document {} does not belong to user {caller_id}",
            doc.id
        )))
    }
}
