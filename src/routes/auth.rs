use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::auth::roles::Role;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{AuditAction, User};
use crate::response::{self, ApiResponse};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub institution: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthData {
    pub token: String,
    pub user: User,
}

fn auth_cookie(token: &str) -> CookieJar {
    let access = Cookie::build(("access_token", token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(8))
        .build();
    CookieJar::new().add(access)
}

fn issue_token(user: &User, secret: &str) -> Result<String, AppError> {
    let claims = Claims::new(
        user.id,
        user.email.clone(),
        user.name.clone(),
        user.roles.clone(),
    );
    encode_token(&claims, secret).map_err(AppError::Internal)
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthData>>), AppError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::BadRequest("name and email are required".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password)?;

    // Advisory lock prevents concurrent bootstrap registrations
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    // First account becomes the coordinator; everyone after is an author.
    let count = db::users::count_all(&mut *tx).await?;
    let roles = if count == 0 {
        vec![Role::Coordinator]
    } else {
        vec![Role::Author]
    };

    let user = db::users::create(
        &mut *tx,
        req.name.trim(),
        req.email.trim(),
        &pw_hash,
        &roles,
        req.institution.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("an account with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tx.commit().await?;

    audit::record(
        &state.pool,
        AuditAction::Inserted,
        "users",
        "user",
        &user.name,
        Some(&user.email),
        Some(json!({ "id": user.id })),
    )
    .await;

    let token = issue_token(&user, &state.config.jwt_secret)?;
    let jar = auth_cookie(&token);
    Ok((jar, response::ok_message(AuthData { token, user }, "account created")))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<AuthData>>), AppError> {
    let user = db::users::find_by_email(&state.pool, req.email.trim())
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let token = issue_token(&user, &state.config.jwt_secret)?;
    let jar = auth_cookie(&token);
    Ok((jar, response::ok(AuthData { token, user })))
}
