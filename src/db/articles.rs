use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Article, ArticleStatus, ArticleVersion};

pub struct NewArticle<'a> {
    pub title: &'a str,
    pub abstract_text: &'a str,
    pub theme_area: &'a str,
    pub keywords: Vec<String>,
    pub event_id: Uuid,
    pub author_ids: Vec<Uuid>,
    pub submitter_id: Uuid,
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    article: &NewArticle<'_>,
) -> Result<Article, sqlx::Error> {
    sqlx::query_as::<_, Article>(
        "INSERT INTO articles (title, abstract, theme_area, keywords, event_id, author_ids, submitter_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(article.title)
    .bind(article.abstract_text)
    .bind(article.theme_area)
    .bind(&article.keywords)
    .bind(article.event_id)
    .bind(&article.author_ids)
    .bind(article.submitter_id)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct ListParams {
    pub status: Option<ArticleStatus>,
    pub event_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub limit: i64,
    pub offset: i64,
}

fn filter_clauses(params: &ListParams) -> (String, usize) {
    let mut sql = String::new();
    let mut n = 0;
    if params.status.is_some() {
        n += 1;
        sql.push_str(&format!(" AND status = ${n}"));
    }
    if params.event_id.is_some() {
        n += 1;
        sql.push_str(&format!(" AND event_id = ${n}"));
    }
    if params.author_id.is_some() {
        n += 1;
        sql.push_str(&format!(" AND ${n} = ANY(author_ids)"));
    }
    (sql, n)
}

pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<Article>, sqlx::Error> {
    let (filters, n) = filter_clauses(params);
    let sql = format!(
        "SELECT * FROM articles WHERE 1=1{filters}
         ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
        n + 1,
        n + 2
    );

    let mut query = sqlx::query_as::<_, Article>(&sql);
    if let Some(status) = params.status {
        query = query.bind(status);
    }
    if let Some(event_id) = params.event_id {
        query = query.bind(event_id);
    }
    if let Some(author_id) = params.author_id {
        query = query.bind(author_id);
    }
    query.bind(params.limit).bind(params.offset).fetch_all(pool).await
}

pub async fn count(pool: &PgPool, params: &ListParams) -> Result<i64, sqlx::Error> {
    let (filters, _) = filter_clauses(params);
    let sql = format!("SELECT COUNT(*) FROM articles WHERE 1=1{filters}");

    let mut query = sqlx::query_as::<_, (i64,)>(&sql);
    if let Some(status) = params.status {
        query = query.bind(status);
    }
    if let Some(event_id) = params.event_id {
        query = query.bind(event_id);
    }
    if let Some(author_id) = params.author_id {
        query = query.bind(author_id);
    }
    let row = query.fetch_one(pool).await?;
    Ok(row.0)
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: ArticleStatus,
) -> Result<Article, sqlx::Error> {
    sqlx::query_as::<_, Article>("UPDATE articles SET status = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn add_version(
    pool: &PgPool,
    article_id: Uuid,
    version_number: i32,
    file_path: &str,
) -> Result<ArticleVersion, sqlx::Error> {
    sqlx::query_as::<_, ArticleVersion>(
        "INSERT INTO article_versions (article_id, version_number, file_path)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(article_id)
    .bind(version_number)
    .bind(file_path)
    .fetch_one(pool)
    .await
}

pub async fn latest_version(
    pool: &PgPool,
    article_id: Uuid,
) -> Result<Option<ArticleVersion>, sqlx::Error> {
    sqlx::query_as::<_, ArticleVersion>(
        "SELECT * FROM article_versions WHERE article_id = $1
         ORDER BY version_number DESC LIMIT 1",
    )
    .bind(article_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_versions(
    pool: &PgPool,
    article_id: Uuid,
) -> Result<Vec<ArticleVersion>, sqlx::Error> {
    sqlx::query_as::<_, ArticleVersion>(
        "SELECT * FROM article_versions WHERE article_id = $1 ORDER BY version_number",
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
}
