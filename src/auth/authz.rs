use crate::{auth::JwtClaims, errors::AppError, models::UserRole};

/// Check if user has a specific role
pub async fn require_role(claims: &JwtClaims, required_role: UserRole) -> Result<(), AppError> {
    if claims.role != required_role && claims.role != UserRole::Admin {
        return Err(AppError::Forbidden(format!(
            "Required role: {:?}, got: {:?}",
            required_role, claims.role
        )));
    }
    Ok(())
}

/// Check if user has admin role
pub async fn require_admin(claims: &JwtClaims) -> Result<(), AppError> {
    require_role(claims, UserRole::Admin).await
}
