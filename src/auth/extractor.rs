use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::jwt;
use crate::auth::roles::{permitted, Role};
use crate::error::AppError;
use crate::state::SharedState;

/// Authenticated platform identity, decoded from a bearer JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub roles: Vec<Role>,
}

impl AuthUser {
    /// Allow-list check for a route. The extractor has already handled 401,
    /// so a miss here is always 403.
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), AppError> {
        if permitted(&self.roles, allowed) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "insufficient role for this operation".to_string(),
            ))
        }
    }

    pub fn is_coordinator(&self) -> bool {
        self.roles.contains(&Role::Coordinator)
    }
}

fn user_from_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let claims = jwt::decode_token(token, secret)
        .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))?;
    Ok(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        name: claims.name,
        roles: claims.roles,
    })
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = crate::auth::bearer_token(&parts.headers)? {
            return user_from_token(&token, &state.config.jwt_secret);
        }

        // Cookie-based auth for server-rendered pages
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get("access_token") {
            return user_from_token(cookie.value(), &state.config.jwt_secret);
        }

        Err(AppError::Unauthorized("token missing".to_string()))
    }
}
