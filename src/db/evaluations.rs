use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Evaluation;

pub async fn create(
    pool: &PgPool,
    article_id: Uuid,
    reviewer_id: Uuid,
) -> Result<Evaluation, sqlx::Error> {
    sqlx::query_as::<_, Evaluation>(
        "INSERT INTO evaluations (article_id, reviewer_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(article_id)
    .bind(reviewer_id)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Evaluation>, sqlx::Error> {
    sqlx::query_as::<_, Evaluation>("SELECT * FROM evaluations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_article(
    pool: &PgPool,
    article_id: Uuid,
) -> Result<Vec<Evaluation>, sqlx::Error> {
    sqlx::query_as::<_, Evaluation>(
        "SELECT * FROM evaluations WHERE article_id = $1 ORDER BY created_at",
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_reviewer(
    pool: &PgPool,
    reviewer_id: Uuid,
) -> Result<Vec<Evaluation>, sqlx::Error> {
    sqlx::query_as::<_, Evaluation>(
        "SELECT * FROM evaluations WHERE reviewer_id = $1 ORDER BY created_at DESC",
    )
    .bind(reviewer_id)
    .fetch_all(pool)
    .await
}

pub async fn complete(
    pool: &PgPool,
    id: Uuid,
    score: i16,
    comments: Option<&str>,
) -> Result<Evaluation, sqlx::Error> {
    sqlx::query_as::<_, Evaluation>(
        "UPDATE evaluations SET score = $2, comments = $3, completed_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(score)
    .bind(comments)
    .fetch_one(pool)
    .await
}
