use crate::models::UserRole;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,    // User ID
    pub email: String,  // User email
    pub role: UserRole, // User role
    pub exp: usize,     // Expiration time
    pub iat: usize,     // Issued at
}

/// Issues a signed access token for the given user.
pub fn issue_jwt(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    secret: &str,
    expiry_seconds: i64,
) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = JwtClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: (now + expiry_seconds) as usize,
        iat: now as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims> {
    let mut validation = Validation::new(Algorithm::HS256);

    // Allow for some clock skew
    validation.leeway = 60;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &validation)
        .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

    #[test]
    fn test_jwt_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_jwt(user_id, "test@example.com", UserRole::Student, SECRET, 3600)
            .expect("token should encode");

        let claims = decode_jwt(&token, SECRET).expect("token should decode");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, UserRole::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_jwt_rejects_wrong_secret() {
        let token = issue_jwt(
            Uuid::new_v4(),
            "test@example.com",
            UserRole::Admin,
            SECRET,
            3600,
        )
        .expect("token should encode");

        let result = decode_jwt(&token, "a-completely-different-secret-32-chars!");
        assert!(result.is_err());
    }
}
