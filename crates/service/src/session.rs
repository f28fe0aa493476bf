//! Session activity recording.
//!
//! Authentication itself lives outside this system; the auth layer
//! calls these after a successful login or before a logout so the
//! activity log captures session events alongside document events.

use docguard_core::activity::ActionKind;
use docguard_core::error::CoreError;
use docguard_core::types::DbId;
use docguard_db::models::activity_log::{ActivityLog, CreateActivityLog};
use docguard_db::repositories::{ActivityLogRepo, UserRepo};
use docguard_db::DbPool;

use crate::error::ServiceResult;

/// Record a `login` event for a user.
pub async fn record_login(pool: &DbPool, user_id: DbId) -> ServiceResult<ActivityLog> {
    record_session_event(pool, user_id, ActionKind::Login).await
}

/// Record a `logout` event for a user.
pub async fn record_logout(pool: &DbPool, user_id: DbId) -> ServiceResult<ActivityLog> {
    record_session_event(pool, user_id, ActionKind::Logout).await
}

async fn record_session_event(
    pool: &DbPool,
    user_id: DbId,
    action: ActionKind,
) -> ServiceResult<ActivityLog> {
    UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    let event = ActivityLogRepo::record_standalone(
        pool,
        &CreateActivityLog {
            user_id,
            action: action.as_str().into(),
            document_id: None,
        },
    )
    .await?;
    Ok(event)
}
