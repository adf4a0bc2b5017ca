use sqlx::PgPool;

use crate::models::AuditAction;

/// Record an audit entry. Called explicitly in handlers after mutations;
/// a failed write is logged and never surfaced to the caller.
pub async fn record(
    pool: &PgPool,
    action: AuditAction,
    sector: &str,
    resource: &str,
    actor_name: &str,
    actor_email: Option<&str>,
    payload: Option<serde_json::Value>,
) {
    if let Err(e) = crate::db::audit::record(
        pool,
        action,
        sector,
        resource,
        actor_name,
        actor_email,
        payload,
    )
    .await
    {
        tracing::error!("Failed to record audit entry: {e}");
    }
}
