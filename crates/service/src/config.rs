use std::path::PathBuf;

/// Service configuration loaded from environment variables.
///
/// The database URL is read separately by the binary so libraries
/// never touch it.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Root directory of the local blob store (default: `./data/blobs`).
    pub storage_root: PathBuf,
}

impl ServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default        |
    /// |----------------|----------------|
    /// | `STORAGE_ROOT` | `./data/blobs` |
    pub fn from_env() -> Self {
        let storage_root = std::env::var("STORAGE_ROOT")
            .unwrap_or_else(|_| "./data/blobs".into())
            .into();

        Self { storage_root }
    }
}
