use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::auth::extractor::AuthUser;
use crate::auth::roles::Role;
use crate::dates::{self, DateFormat};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

const DASHBOARD_PAGE_SIZE: i64 = 100;

#[allow(dead_code)]
struct ArticleRow {
    id: String,
    title: String,
    theme_area: String,
    status: String,
    submitted_on: String,
}

#[allow(dead_code)]
struct EventRow {
    id: String,
    name: String,
    status: String,
    starts_on: String,
    ends_on: String,
}

#[allow(dead_code)]
struct EvaluationRow {
    id: String,
    article_id: String,
    article_title: String,
    score: String,
    completed: bool,
}

#[derive(Template)]
#[template(path = "dashboard/coordinator.html")]
#[allow(dead_code)]
struct CoordinatorTemplate {
    user_name: String,
    articles: Vec<ArticleRow>,
    events: Vec<EventRow>,
}

#[derive(Template)]
#[template(path = "dashboard/reviewer.html")]
#[allow(dead_code)]
struct ReviewerTemplate {
    user_name: String,
    evaluations: Vec<EvaluationRow>,
}

#[derive(Template)]
#[template(path = "dashboard/author.html")]
#[allow(dead_code)]
struct AuthorTemplate {
    user_name: String,
    articles: Vec<ArticleRow>,
}

fn article_rows(articles: &[crate::models::Article]) -> Vec<ArticleRow> {
    articles
        .iter()
        .map(|a| ArticleRow {
            id: a.id.to_string(),
            title: a.title.clone(),
            theme_area: a.theme_area.clone(),
            status: serde_json::json!(a.status)
                .as_str()
                .unwrap_or_default()
                .to_string(),
            submitted_on: a.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

/// Role-gated dashboard: a coordinator sees everything, a reviewer their
/// assignment queue, an author their own submissions.
pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    if auth.is_coordinator() {
        let articles = db::articles::list(
            &state.pool,
            &db::articles::ListParams {
                status: None,
                event_id: None,
                author_id: None,
                limit: DASHBOARD_PAGE_SIZE,
                offset: 0,
            },
        )
        .await?;
        let events = db::events::list(&state.pool, DASHBOARD_PAGE_SIZE, 0).await?;

        let template = CoordinatorTemplate {
            user_name: auth.name.clone(),
            articles: article_rows(&articles),
            events: events
                .iter()
                .map(|e| EventRow {
                    id: e.id.to_string(),
                    name: e.name.clone(),
                    status: serde_json::json!(e.status)
                        .as_str()
                        .unwrap_or_default()
                        .to_string(),
                    starts_on: dates::format_date(e.starts_on, DateFormat::BrDate),
                    ends_on: dates::format_date(e.ends_on, DateFormat::BrDate),
                })
                .collect(),
        };
        return Ok(Html(template.render().unwrap_or_default()));
    }

    if auth.roles.contains(&Role::Reviewer) {
        let evaluations = db::evaluations::list_by_reviewer(&state.pool, auth.user_id).await?;

        let mut rows = Vec::new();
        for evaluation in &evaluations {
            let title = db::articles::find_by_id(&state.pool, evaluation.article_id)
                .await?
                .map(|a| a.title)
                .unwrap_or_default();
            rows.push(EvaluationRow {
                id: evaluation.id.to_string(),
                article_id: evaluation.article_id.to_string(),
                article_title: title,
                score: evaluation
                    .score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                completed: evaluation.is_completed(),
            });
        }

        let template = ReviewerTemplate {
            user_name: auth.name.clone(),
            evaluations: rows,
        };
        return Ok(Html(template.render().unwrap_or_default()));
    }

    let articles = db::articles::list(
        &state.pool,
        &db::articles::ListParams {
            status: None,
            event_id: None,
            author_id: Some(auth.user_id),
            limit: DASHBOARD_PAGE_SIZE,
            offset: 0,
        },
    )
    .await?;

    let template = AuthorTemplate {
        user_name: auth.name.clone(),
        articles: article_rows(&articles),
    };
    Ok(Html(template.render().unwrap_or_default()))
}
