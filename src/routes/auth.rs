use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    auth::{hash_password, issue_jwt, verify_password, JwtClaims},
    errors::{conflict_on_unique, AppError, Result},
    models::{
        AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, User, UserResponse,
    },
    routes::extract::AppJson,
    state::AppState,
};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at, last_activity_at";

/// Register a new account. Self-service registration always creates a
/// student; admins only exist through seeding.
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_lowercase();
    let password = payload.password.as_deref().unwrap_or_default();

    if name.chars().count() < 2 {
        return Err(AppError::Validation(
            "name must be at least 2 characters".to_string(),
        ));
    }
    if !is_valid_email(&email) {
        return Err(AppError::Validation("email is not valid".to_string()));
    }
    if password.len() < 6 {
        return Err(AppError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }

    let password_hash = hash_password(password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| conflict_on_unique(e, "An account with this email already exists"))?;

    let token = issue_jwt(
        user.id,
        &user.email,
        user.role.clone(),
        &state.config.jwt.secret,
        state.config.jwt.access_token_expiry,
    )?;

    let response = AuthResponse {
        token,
        expires_in: state.config.jwt.access_token_expiry,
        user: user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_lowercase();
    let password = payload.password.as_deref().unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(&email)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    // A successful login counts as activity
    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET last_activity_at = now() WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(user.id)
    .fetch_one(&state.pool)
    .await?;

    let token = issue_jwt(
        user.id,
        &user.email,
        user.role.clone(),
        &state.config.jwt.secret,
        state.config.jwt.access_token_expiry,
    )?;

    Ok(Json(AuthResponse {
        token,
        expires_in: state.config.jwt.access_token_expiry,
        user: user.into(),
    }))
}

/// Get current user info
pub async fn me(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

/// Update the caller's display name
pub async fn update_profile(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    if name.chars().count() < 2 {
        return Err(AppError::Validation(
            "name must be at least 2 characters".to_string(),
        ));
    }

    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET name = $2, last_activity_at = now() WHERE id = $1 \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(name)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

/// Shape check matching the usual one-line email pattern: something before
/// the @, and a domain with a dot that is neither first nor last.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plausible_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn test_rejects_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("missing@dot"));
        assert!(!is_valid_email("two@@signs.com"));
        assert!(!is_valid_email("spaces in@local.com"));
        assert!(!is_valid_email("@nolocal.com"));
        assert!(!is_valid_email("trailing@dot."));
        assert!(!is_valid_email("leading@.dot"));
    }
}
