use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::internal::InternalCaller;
use crate::db;
use crate::error::AppError;
use crate::models::AuditAction;
use crate::response;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RecordLogRequest {
    pub action: AuditAction,
    pub sector: String,
    pub resource: String,
    pub actor_name: String,
    pub actor_email: Option<String>,
    pub payload: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sector: Option<String>,
    pub action: Option<AuditAction>,
}

/// Record one data-mutation entry. The log is append-only: no update or
/// delete route exists.
pub async fn record_log(
    _caller: InternalCaller,
    State(state): State<SharedState>,
    Json(req): Json<RecordLogRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if req.sector.trim().is_empty()
        || req.resource.trim().is_empty()
        || req.actor_name.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "sector, resource and actor_name are required".to_string(),
        ));
    }

    let entry = db::audit::record(
        &state.pool,
        req.action,
        req.sector.trim(),
        req.resource.trim(),
        req.actor_name.trim(),
        req.actor_email.as_deref(),
        req.payload,
    )
    .await?;

    Ok(response::ok(entry))
}

pub async fn list_logs(
    _caller: InternalCaller,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(50).clamp(1, 200);

    let params = db::audit::ListParams {
        sector: query.sector,
        action: query.action,
        limit: per_page,
        offset: (page - 1) * per_page,
    };

    let entries = db::audit::list(&state.pool, &params).await?;
    let total = db::audit::count(&state.pool, &params).await?;

    Ok(response::ok(json!({
        "entries": entries,
        "total": total,
        "page": page,
        "per_page": per_page,
    })))
}

pub async fn get_log(
    _caller: InternalCaller,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entry = db::audit::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("log entry not found".to_string()))?;
    Ok(response::ok(entry))
}
