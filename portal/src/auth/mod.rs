pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::AuthUser;

use util::auth::{AuthError, encode_token};
use util::config::AppConfig;
use util::roles::Role;

/// Generates a JWT and its expiry timestamp for a given user, signed with the
/// configured secret and lifetime.
pub fn generate_jwt(user_id: i64, role: Role) -> Result<(String, String), AuthError> {
    let cfg = AppConfig::global();
    encode_token(
        user_id,
        role,
        &cfg.jwt_secret,
        cfg.jwt_duration_minutes as i64,
    )
}
