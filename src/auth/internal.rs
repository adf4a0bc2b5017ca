use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::SharedState;

/// Caller of the internal data-management module (`/api/e`).
///
/// Trust is established by a single pre-shared token whose SHA-256 hash is
/// configured out-of-band. The acting user for each log entry travels in the
/// request body, since the caller is a trusted upstream system.
#[derive(Debug, Clone)]
pub struct InternalCaller;

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

impl FromRequestParts<SharedState> for InternalCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = crate::auth::bearer_token(&parts.headers)?
            .ok_or_else(|| AppError::Unauthorized("token missing".to_string()))?;

        let presented = hash_token(&token);
        let expected = &state.config.internal_token_sha256;

        let matches: bool = presented
            .as_bytes()
            .ct_eq(expected.as_bytes())
            .into();
        if !matches {
            return Err(AppError::Unauthorized(
                "invalid internal token".to_string(),
            ));
        }

        Ok(InternalCaller)
    }
}
