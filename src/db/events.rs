use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Event, EventStatus};

pub async fn create(
    pool: &PgPool,
    name: &str,
    description: &str,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "INSERT INTO events (name, description, starts_on, ends_on)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(starts_on)
    .bind(ends_on)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "SELECT * FROM events ORDER BY starts_on DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    description: &str,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    status: EventStatus,
) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "UPDATE events SET name = $2, description = $3, starts_on = $4, ends_on = $5, status = $6
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(starts_on)
    .bind(ends_on)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn set_banner(pool: &PgPool, id: Uuid, banner_path: &str) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>("UPDATE events SET banner_path = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(banner_path)
        .fetch_one(pool)
        .await
}
