use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::dates::{self, DateFormat};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[allow(dead_code)]
struct VersionRow {
    number: i32,
    file_path: String,
    submitted_on: String,
}

#[allow(dead_code)]
struct EvaluationRow {
    reviewer: String,
    score: String,
    comments: String,
    completed: bool,
}

#[derive(Template)]
#[template(path = "articles/detail.html")]
#[allow(dead_code)]
struct ArticleDetailTemplate {
    title: String,
    abstract_text: String,
    theme_area: String,
    keywords: String,
    status: String,
    versions: Vec<VersionRow>,
    evaluations: Vec<EvaluationRow>,
}

pub async fn show(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let article = db::articles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;

    let versions = db::articles::list_versions(&state.pool, id).await?;
    let evaluations = db::evaluations::list_by_article(&state.pool, id).await?;

    let mut evaluation_rows = Vec::new();
    for evaluation in &evaluations {
        let reviewer = db::users::find_by_id(&state.pool, evaluation.reviewer_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_default();
        evaluation_rows.push(EvaluationRow {
            reviewer,
            score: evaluation
                .score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            comments: evaluation.comments.clone().unwrap_or_default(),
            completed: evaluation.is_completed(),
        });
    }

    let template = ArticleDetailTemplate {
        title: article.title.clone(),
        abstract_text: article.abstract_text.clone(),
        theme_area: article.theme_area.clone(),
        keywords: article.keywords.join(", "),
        status: serde_json::json!(article.status)
            .as_str()
            .unwrap_or_default()
            .to_string(),
        versions: versions
            .iter()
            .map(|v| VersionRow {
                number: v.version_number,
                file_path: v.file_path.clone(),
                submitted_on: dates::format_datetime(&v.submitted_at, DateFormat::BrDate),
            })
            .collect(),
        evaluations: evaluation_rows,
    };
    Ok(Html(template.render().unwrap_or_default()))
}
