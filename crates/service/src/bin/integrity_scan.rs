//! One-shot integrity sweep over all monitored documents.
//!
//! Intended for cron or manual operator use. Exits non-zero when any
//! mismatch is found so schedulers can alert on it.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docguard_service::{IntegrityService, ServiceConfig};
use docguard_storage::LocalContentStore;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docguard_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServiceConfig::from_env();
    tracing::info!(storage_root = %config.storage_root.display(), "Loaded configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = docguard_db::create_pool(&database_url).await?;
    docguard_db::health_check(&pool).await?;
    docguard_db::run_migrations(&pool).await?;
    tracing::info!("Database ready");

    // --- Content store ---
    let store = Arc::new(LocalContentStore::open_root(&config.storage_root).await?);

    // --- Sweep ---
    let integrity = IntegrityService::new(pool, store);
    let summary = integrity.sweep_monitored().await?;

    for report in summary.reports.iter().filter(|r| !r.is_match()) {
        tracing::error!(
            document_id = report.document_id,
            stored = %report.stored,
            computed = %report.computed,
            "Document failed integrity check"
        );
    }

    if summary.mismatches > 0 || summary.unreadable > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
