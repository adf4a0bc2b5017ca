use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
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
use crate::upload;

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<ArticleStatus>,
    pub event_id: Option<Uuid>,
    pub mine: Option<bool>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let params = db::articles::ListParams {
        status: query.status,
        event_id: query.event_id,
        author_id: query.mine.unwrap_or(false).then_some(auth.user_id),
        limit: per_page,
        offset: (page - 1) * per_page,
    };

    let articles = db::articles::list(&state.pool, &params).await?;
    let total = db::articles::count(&state.pool, &params).await?;

    Ok(response::ok(json!({
        "articles": articles,
        "total": total,
        "page": page,
        "per_page": per_page,
        "total_pages": (total + per_page - 1) / per_page,
    })))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let article = db::articles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;
    let versions = db::articles::list_versions(&state.pool, id).await?;

    Ok(response::ok(json!({
        "article": article,
        "versions": versions,
    })))
}

/// Submit a new article: multipart form with the PDF plus metadata fields
/// (`title`, `abstract`, `theme_area`, `event_id`, optional comma-separated
/// `keywords` and `co_author_ids`).
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Author])?;

    let form = upload::receive(
        &headers,
        body,
        upload::ARTICLE_MIME_TYPES,
        state.config.max_upload_size,
    )
    .await?;

    let title = form.field("title")?.to_string();
    let abstract_text = form.field("abstract")?.to_string();
    let theme_area = form.field("theme_area")?.to_string();
    let event_id: Uuid = form
        .field("event_id")?
        .parse()
        .map_err(|_| AppError::BadRequest("event_id must be a UUID".to_string()))?;

    let keywords = csv_values(form.fields.get("keywords"));
    let mut author_ids = vec![auth.user_id];
    for raw in csv_values(form.fields.get("co_author_ids")) {
        let id: Uuid = raw
            .parse()
            .map_err(|_| AppError::BadRequest("co_author_ids must be UUIDs".to_string()))?;
        if !author_ids.contains(&id) {
            author_ids.push(id);
        }
    }

    db::events::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("unknown event".to_string()))?;

    // Validation is done; only now does the file reach disk.
    let (file, _) = form.require_file()?;
    let file = file.store(&state.config.upload_dir).await?;

    let article = db::articles::create(
        &state.pool,
        &db::articles::NewArticle {
            title: &title,
            abstract_text: &abstract_text,
            theme_area: &theme_area,
            keywords,
            event_id,
            author_ids,
            submitter_id: auth.user_id,
        },
    )
    .await?;

    let version = db::articles::add_version(&state.pool, article.id, 1, &file.path).await?;

    audit::record(
        &state.pool,
        AuditAction::Inserted,
        "articles",
        "article",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": article.id, "title": article.title })),
    )
    .await;

    Ok(response::ok(json!({
        "article": article,
        "version": version,
    })))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: ArticleStatus,
}

/// Direct status write, guarded by role and by the closed transition table.
/// Author-driven transitions happen through version resubmission, so this
/// endpoint is coordinator-only.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    auth.require_any(&[Role::Coordinator])?;

    let article = db::articles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;

    if !article.status.can_transition(req.status) {
        return Err(AppError::Conflict(format!(
            "cannot transition article from {:?} to {:?}",
            article.status, req.status
        )));
    }

    let updated = db::articles::update_status(&state.pool, id, req.status).await?;

    audit::record(
        &state.pool,
        AuditAction::Updated,
        "articles",
        "article",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "id": id, "status": req.status })),
    )
    .await;

    Ok(response::ok(updated))
}

/// Resubmit the article file. Allowed to its authors while the article is
/// `submitted` or `revision_requested`; a resubmission after a revision
/// request moves the article back under review.
pub async fn add_version(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let article = db::articles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;

    if !article.has_author(auth.user_id) {
        return Err(AppError::Forbidden(
            "only an author of this article may submit a version".to_string(),
        ));
    }

    if !matches!(
        article.status,
        ArticleStatus::Submitted | ArticleStatus::RevisionRequested
    ) {
        return Err(AppError::Conflict(format!(
            "article in status {:?} does not accept new versions",
            article.status
        )));
    }

    let form = upload::receive(
        &headers,
        body,
        upload::ARTICLE_MIME_TYPES,
        state.config.max_upload_size,
    )
    .await?;
    let (file, _) = form.require_file()?;

    let next_number = db::articles::latest_version(&state.pool, id)
        .await?
        .map(|v| v.version_number + 1)
        .unwrap_or(1);

    let file = file.store(&state.config.upload_dir).await?;

    let version = db::articles::add_version(&state.pool, id, next_number, &file.path).await?;

    let article = if article.status == ArticleStatus::RevisionRequested {
        db::articles::update_status(&state.pool, id, ArticleStatus::UnderReview).await?
    } else {
        article
    };

    audit::record(
        &state.pool,
        AuditAction::Updated,
        "articles",
        "article_version",
        &auth.name,
        Some(&auth.email),
        Some(json!({ "article_id": id, "version": next_number })),
    )
    .await;

    Ok(response::ok(json!({
        "article": article,
        "version": version,
    })))
}

fn csv_values(raw: Option<&String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
