//! In-process service layer: the collaborator-facing API over the
//! content store, hash verifier, version ledger, and metadata store.
//!
//! Callers (web glue, CLIs, admin tooling) construct a
//! [`DocumentService`] or [`IntegrityService`] and invoke operations
//! with an explicit caller identity -- there is no ambient "current
//! user".

pub mod config;
pub mod documents;
pub mod error;
pub mod integrity;
pub mod session;

pub use config::ServiceConfig;
pub use documents::DocumentService;
pub use error::{ServiceError, ServiceResult};
pub use integrity::{IntegrityReport, IntegrityService};
