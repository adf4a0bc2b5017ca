use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::roles::Role;
use crate::dates;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{AuditAction, EventStatus};
use crate::response;
use crate::state::SharedState;
use crate::upload;

#[derive(Deserialize)]
pub struct CreateEvent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Accepted in ISO (`YYYY-MM-DD`) or Brazilian (`DD/MM/YYYY`) form.
    pub starts_on: String,
    pub ends_on: String,
}

#[derive(Deserialize)]
pub struct UpdateEvent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub starts_on: String,
    pub ends_on: String,
    pub status: EventStatus,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

fn parse_event_date(raw: &str, field: &str) -> Result<chrono::NaiveDate, AppError> {
    dates::parse_date(raw).map_err(|e| AppError::BadRequest(format!("{field}: {e}")))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateEvent>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("event name is required".to_string()));
    }
    let starts_on = parse_event_date(&req.starts_on, "starts_on")?;
    let ends_on = parse_event_date(&req.ends_on, "ends_on")?;
    if ends_on < starts_on {
        return Err(AppError::BadRequest(
            "ends_on must not precede starts_on".to_string(),
        ));
    }

    let event =
        db::events::create(&state.pool, req.name.trim(), &req.description, starts_on, ends_on)
            .await?;

    audit::record(
        &state.pool,
        AuditAction::Inserted,
        "events",
        "event",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": event.id, "name": event.name })),
    )
    .await;

    Ok(response::ok(event))
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let events = db::events::list(&state.pool, per_page, (page - 1) * per_page).await?;
    Ok(response::ok(json!({
        "events": events,
        "page": page,
        "per_page": per_page,
    })))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let event = db::events::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;
    Ok(response::ok(event))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEvent>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;

    let starts_on = parse_event_date(&req.starts_on, "starts_on")?;
    let ends_on = parse_event_date(&req.ends_on, "ends_on")?;
    if ends_on < starts_on {
        return Err(AppError::BadRequest(
            "ends_on must not precede starts_on".to_string(),
        ));
    }

    let event = db::events::update(
        &state.pool,
        id,
        req.name.trim(),
        &req.description,
        starts_on,
        ends_on,
        req.status,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("event not found".to_string()),
        _ => AppError::Database(e),
    })?;

    audit::record(
        &state.pool,
        AuditAction::Updated,
        "events",
        "event",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": id })),
    )
    .await;

    Ok(response::ok(event))
}

/// Upload the event banner image (JPEG, PNG or GIF).
pub async fn upload_banner(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;

    db::events::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;

    let form = upload::receive(
        &headers,
        body,
        upload::BANNER_MIME_TYPES,
        state.config.max_upload_size,
    )
    .await?;
    let (file, _) = form.require_file()?;
    let file = file.store(&state.config.upload_dir).await?;

    let event = db::events::set_banner(&state.pool, id, &file.path).await?;

    audit::record(
        &state.pool,
        AuditAction::Updated,
        "events",
        "event_banner",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": id, "banner_path": file.path })),
    )
    .await;

    Ok(response::ok(event))
}
