pub mod authz;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use authz::{require_admin, require_role};
pub use jwt::{decode_jwt, issue_jwt, JwtClaims};
pub use middleware::auth_required;
pub use password::{hash_password, verify_password};
