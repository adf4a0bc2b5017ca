use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::roles::Role;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub roles: Vec<Role>,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, name: String, roles: Vec<Role>) -> Self {
        Self {
            sub: user_id,
            email,
            name,
            roles,
            exp: (Utc::now() + Duration::hours(8)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_claims() {
        let claims = Claims::new(
            Uuid::now_v7(),
            "ana@example.org".to_string(),
            "Ana".to_string(),
            vec![Role::Author, Role::Reviewer],
        );
        let token = encode_token(&claims, "secret").unwrap();
        let decoded = decode_token(&token, "secret").unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.roles, claims.roles);
    }

    #[test]
    fn wrong_secret_fails() {
        let claims = Claims::new(Uuid::now_v7(), "a@b.c".into(), "A".into(), vec![]);
        let token = encode_token(&claims, "secret").unwrap();
        assert!(decode_token(&token, "other").is_err());
    }
}
