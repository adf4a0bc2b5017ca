use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Checklist, ChecklistQuestion};

pub async fn create(
    pool: &PgPool,
    event_id: Uuid,
    name: &str,
    description: &str,
    questions: &[ChecklistQuestion],
) -> Result<Checklist, sqlx::Error> {
    sqlx::query_as::<_, Checklist>(
        "INSERT INTO checklists (event_id, name, description, questions)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(event_id)
    .bind(name)
    .bind(description)
    .bind(Json(questions))
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Checklist>, sqlx::Error> {
    sqlx::query_as::<_, Checklist>("SELECT * FROM checklists WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_event(pool: &PgPool, event_id: Uuid) -> Result<Vec<Checklist>, sqlx::Error> {
    sqlx::query_as::<_, Checklist>(
        "SELECT * FROM checklists WHERE event_id = $1 ORDER BY created_at",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    description: &str,
    questions: &[ChecklistQuestion],
) -> Result<Checklist, sqlx::Error> {
    sqlx::query_as::<_, Checklist>(
        "UPDATE checklists SET name = $2, description = $3, questions = $4
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(Json(questions))
    .fetch_one(pool)
    .await
}
