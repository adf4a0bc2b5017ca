use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AuditAction, AuditEntry};

pub async fn record(
    pool: &PgPool,
    action: AuditAction,
    sector: &str,
    resource: &str,
    actor_name: &str,
    actor_email: Option<&str>,
    payload: Option<serde_json::Value>,
) -> Result<AuditEntry, sqlx::Error> {
    sqlx::query_as::<_, AuditEntry>(
        "INSERT INTO audit_log (action, sector, resource, actor_name, actor_email, payload)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(action)
    .bind(sector)
    .bind(resource)
    .bind(actor_name)
    .bind(actor_email)
    .bind(payload)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<AuditEntry>, sqlx::Error> {
    sqlx::query_as::<_, AuditEntry>("SELECT * FROM audit_log WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct ListParams {
    pub sector: Option<String>,
    pub action: Option<AuditAction>,
    pub limit: i64,
    pub offset: i64,
}

fn filter_clauses(params: &ListParams) -> (String, usize) {
    let mut sql = String::new();
    let mut n = 0;
    if params.sector.is_some() {
        n += 1;
        sql.push_str(&format!(" AND sector = ${n}"));
    }
    if params.action.is_some() {
        n += 1;
        sql.push_str(&format!(" AND action = ${n}"));
    }
    (sql, n)
}

pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<AuditEntry>, sqlx::Error> {
    let (filters, n) = filter_clauses(params);
    let sql = format!(
        "SELECT * FROM audit_log WHERE 1=1{filters}
         ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
        n + 1,
        n + 2
    );

    let mut query = sqlx::query_as::<_, AuditEntry>(&sql);
    if let Some(sector) = &params.sector {
        query = query.bind(sector);
    }
    if let Some(action) = params.action {
        query = query.bind(action);
    }
    query.bind(params.limit).bind(params.offset).fetch_all(pool).await
}

pub async fn count(pool: &PgPool, params: &ListParams) -> Result<i64, sqlx::Error> {
    let (filters, _) = filter_clauses(params);
    let sql = format!("SELECT COUNT(*) FROM audit_log WHERE 1=1{filters}");

    let mut query = sqlx::query_as::<_, (i64,)>(&sql);
    if let Some(sector) = &params.sector {
        query = query.bind(sector);
    }
    if let Some(action) = params.action {
        query = query.bind(action);
    }
    let row = query.fetch_one(pool).await?;
    Ok(row.0)
}
