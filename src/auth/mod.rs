pub mod extractor;
pub mod internal;
pub mod jwt;
pub mod password;
pub mod roles;

use axum::http::HeaderMap;

use crate::error::AppError;

/// Extract the bearer token from the `Authorization` header.
///
/// `Ok(None)` means the header is absent. A present header must be exactly
/// two space-separated parts with a `Bearer` scheme, otherwise 401.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    let Some(header) = headers.get("authorization") else {
        return Ok(None);
    };

    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("malformed token".to_string()))?;

    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::Unauthorized("malformed token".to_string()));
    }

    Ok(Some(parts[1].to_string()))
}
