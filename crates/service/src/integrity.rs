//! Out-of-band integrity checking.
//!
//! Recomputes the digest of a document's current blob and compares it
//! with the stored hash record. A mismatch is reported as data for the
//! collaborator layer (integrity-history displays, alerting); it is
//! never auto-corrected and never blocks reads.

use std::sync::Arc;

use docguard_core::error::CoreError;
use docguard_core::types::DbId;
use docguard_db::repositories::{DocumentRepo, FileHashRepo, MonitoredFileRepo};
use docguard_db::DbPool;
use docguard_storage::digest::digest_blob;
use docguard_storage::ContentStore;

use crate::error::{ServiceError, ServiceResult};

/// Result of re-checking one document's hash.
#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub document_id: DbId,
    /// Digest recorded when the current blob was last written.
    pub stored: String,
    /// Digest recomputed from the blob just now.
    pub computed: String,
}

impl IntegrityReport {
    /// Whether the stored and recomputed digests agree.
    pub fn is_match(&self) -> bool {
        self.stored == self.computed
    }

    /// Escalate a mismatch into a typed error, for callers that treat
    /// corruption as fatal rather than reportable.
    pub fn ensure_ok(self) -> Result<(), CoreError> {
        if self.is_match() {
            Ok(())
        } else {
            Err(CoreError::IntegrityViolation {
                document_id: self.document_id,
                stored: self.stored,
                computed: self.computed,
            })
        }
    }
}

/// Summary of a monitored-document sweep.
#[derive(Debug)]
pub struct SweepSummary {
    pub reports: Vec<IntegrityReport>,
    pub mismatches: usize,
    /// Documents whose blob could not be read at all.
    pub unreadable: usize,
}

/// Recomputes and compares content digests against stored hash records.
#[derive(Clone)]
pub struct IntegrityService {
    pool: DbPool,
    store: Arc<dyn ContentStore>,
}

impl IntegrityService {
    pub fn new(pool: DbPool, store: Arc<dyn ContentStore>) -> Self {
        Self { pool, store }
    }

    /// Re-check a single document (trashed documents stay hashable, so
    /// they are included).
    ///
    /// Updates the hash record's `last_checked` timestamp; the stored
    /// hash itself is left untouched even on mismatch.
    pub async fn verify_document(&self, document_id: DbId) -> ServiceResult<IntegrityReport> {
        let doc = DocumentRepo::find_by_id_any(&self.pool, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Document",
                id: document_id,
            })?;
        let record = FileHashRepo::find_by_document(&self.pool, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "FileHash",
                id: document_id,
            })?;

        let computed = digest_blob(self.store.as_ref(), &doc.current_blob_key).await?;
        FileHashRepo::touch(&self.pool, document_id).await?;

        let report = IntegrityReport {
            document_id,
            stored: record.hash_value.trim().to_string(),
            computed,
        };
        if !report.is_match() {
            tracing::warn!(
                document_id,
                stored = %report.stored,
                computed = %report.computed,
                "Integrity mismatch detected"
            );
        }
        Ok(report)
    }

    /// Re-check every live document whose monitoring flag is on.
    ///
    /// An unreadable blob is recorded and the sweep continues; other
    /// failures abort it.
    pub async fn sweep_monitored(&self) -> ServiceResult<SweepSummary> {
        let ids = MonitoredFileRepo::monitored_document_ids(&self.pool).await?;

        let mut reports = Vec::with_capacity(ids.len());
        let mut unreadable = 0;
        for id in ids {
            match self.verify_document(id).await {
                Ok(report) => reports.push(report),
                Err(ServiceError::Storage(e)) => {
                    tracing::error!(document_id = id, error = %e, "Blob unreadable during sweep");
                    unreadable += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let mismatches = reports.iter().filter(|r| !r.is_match()).count();
        tracing::info!(
            checked = reports.len(),
            mismatches,
            unreadable,
            "Completed integrity sweep"
        );
        Ok(SweepSummary {
            reports,
            mismatches,
            unreadable,
        })
    }
}
