use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::auth::roles::Role;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::AuditAction;
use crate::response;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<Role>,
    pub institution: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateRoles {
    pub roles: Vec<Role>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let users = db::users::list(&state.pool, per_page, (page - 1) * per_page).await?;
    Ok(response::ok(json!({
        "users": users,
        "page": page,
        "per_page": per_page,
    })))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateUser>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;

    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::BadRequest("name and email are required".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if req.roles.is_empty() {
        return Err(AppError::BadRequest("at least one role is required".to_string()));
    }

    let pw_hash = password::hash(&req.password)?;
    let user = db::users::create(
        &state.pool,
        req.name.trim(),
        req.email.trim(),
        &pw_hash,
        &req.roles,
        req.institution.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("an account with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    audit::record(
        &state.pool,
        AuditAction::Inserted,
        "users",
        "user",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": user.id, "email": user.email })),
    )
    .await;

    Ok(response::ok(user))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if id != auth.user_id {
        auth.require_any(&[Role::Coordinator])?;
    }

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
    Ok(response::ok(user))
}

pub async fn update_roles(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoles>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;

    if req.roles.is_empty() {
        return Err(AppError::BadRequest("at least one role is required".to_string()));
    }

    let user = db::users::update_roles(&state.pool, id, &req.roles)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("user not found".to_string()),
            _ => AppError::Database(e),
        })?;

    audit::record(
        &state.pool,
        AuditAction::Updated,
        "users",
        "user_roles",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": id, "roles": req.roles })),
    )
    .await;

    Ok(response::ok(user))
}
