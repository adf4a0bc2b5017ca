use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::roles::Role;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{AuditAction, ChecklistQuestion};
use crate::response;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ChecklistRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<ChecklistQuestion>,
}

fn validate(req: &ChecklistRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("checklist name is required".to_string()));
    }
    if req.questions.iter().any(|q| q.text.trim().is_empty()) {
        return Err(AppError::BadRequest(
            "every checklist question needs text".to_string(),
        ));
    }
    Ok(())
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(event_id): Path<Uuid>,
    Json(req): Json<ChecklistRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;
    validate(&req)?;

    db::events::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;

    let checklist = db::checklists::create(
        &state.pool,
        event_id,
        req.name.trim(),
        &req.description,
        &req.questions,
    )
    .await?;

    audit::record(
        &state.pool,
        AuditAction::Inserted,
        "checklists",
        "checklist",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": checklist.id, "event_id": event_id })),
    )
    .await;

    Ok(response::ok(checklist))
}

pub async fn list_by_event(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    db::events::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;

    let checklists = db::checklists::list_by_event(&state.pool, event_id).await?;
    Ok(response::ok(checklists))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let checklist = db::checklists::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("checklist not found".to_string()))?;
    Ok(response::ok(checklist))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChecklistRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;
    validate(&req)?;

    let checklist = db::checklists::update(
        &state.pool,
        id,
        req.name.trim(),
        &req.description,
        &req.questions,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("checklist not found".to_string()),
        _ => AppError::Database(e),
    })?;

    audit::record(
        &state.pool,
        AuditAction::Updated,
        "checklists",
        "checklist",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": id })),
    )
    .await;

    Ok(response::ok(checklist))
}
