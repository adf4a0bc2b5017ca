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
use crate::models::{ArticleStatus, AuditAction};
use crate::response;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AssignRequest {
    pub reviewer_id: Uuid,
}

#[derive(Deserialize)]
pub struct CompleteRequest {
    pub score: i16,
    pub comments: Option<String>,
}

/// Assign a reviewer to an article. A first assignment moves a freshly
/// submitted article under review.
pub async fn assign(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(article_id): Path<Uuid>,
    Json(req): Json<AssignRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;

    let article = db::articles::find_by_id(&state.pool, article_id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;

    if !matches!(
        article.status,
        ArticleStatus::Submitted | ArticleStatus::UnderReview
    ) {
        return Err(AppError::Conflict(format!(
            "article in status {:?} cannot receive reviewers",
            article.status
        )));
    }

    let reviewer = db::users::find_by_id(&state.pool, req.reviewer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("reviewer not found".to_string()))?;
    if !reviewer.roles.contains(&Role::Reviewer) {
        return Err(AppError::BadRequest(
            "assigned user does not hold the reviewer role".to_string(),
        ));
    }

    let evaluation = db::evaluations::create(&state.pool, article_id, req.reviewer_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(
                    "this reviewer is already assigned to the article".to_string(),
                )
            }
            _ => AppError::Database(e),
        })?;

    if article.status == ArticleStatus::Submitted {
        db::articles::update_status(&state.pool, article_id, ArticleStatus::UnderReview).await?;
    }

    audit::record(
        &state.pool,
        AuditAction::Inserted,
        "evaluations",
        "evaluation",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": evaluation.id, "article_id": article_id })),
    )
    .await;

    Ok(response::ok(evaluation))
}

pub async fn list_by_article(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(article_id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    db::articles::find_by_id(&state.pool, article_id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;

    let evaluations = db::evaluations::list_by_article(&state.pool, article_id).await?;
    Ok(response::ok(evaluations))
}

/// The authenticated reviewer's assignment queue.
pub async fn mine(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Reviewer])?;

    let evaluations = db::evaluations::list_by_reviewer(&state.pool, auth.user_id).await?;
    Ok(response::ok(evaluations))
}

/// Record the score and comments for an assigned evaluation.
pub async fn complete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CompleteRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Reviewer])?;

    let evaluation = db::evaluations::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("evaluation not found".to_string()))?;

    if evaluation.reviewer_id != auth.user_id {
        return Err(AppError::Forbidden(
            "only the assigned reviewer may complete this evaluation".to_string(),
        ));
    }
    if evaluation.is_completed() {
        return Err(AppError::Conflict(
            "evaluation is already completed".to_string(),
        ));
    }
    if !(0..=10).contains(&req.score) {
        return Err(AppError::BadRequest(
            "score must be between 0 and 10".to_string(),
        ));
    }

    let evaluation =
        db::evaluations::complete(&state.pool, id, req.score, req.comments.as_deref()).await?;

    audit::record(
        &state.pool,
        AuditAction::Updated,
        "evaluations",
        "evaluation",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": id, "score": req.score })),
    )
    .await;

    Ok(response::ok(evaluation))
}
