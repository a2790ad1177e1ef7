//! JWT creation and verification.
//!
//! Every token this service hands out has the same shape whether it came
//! from registration or login: `{sub, email, role, iat, exp}`, signed with
//! HS256 and the secret from [`JwtConfig`].

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use registrar_config::JwtConfig;
use registrar_core::AppError;
use registrar_models::{Role, UserId};

use crate::claims::Claims;

/// Creates an access token that lives for the configured expiry (one day by default).
pub fn create_access_token(
    user_id: UserId,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token_with_ttl(
        user_id,
        email,
        role,
        jwt_config.access_token_expiry,
        jwt_config,
    )
}

/// Creates a token expiring `ttl_seconds` from now.
///
/// A negative ttl yields a token that is already expired, which is only
/// useful in tests.
pub fn create_token_with_ttl(
    user_id: UserId,
    email: &str,
    role: Role,
    ttl_seconds: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now.saturating_add(ttl_seconds).max(0);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// Every failure (bad signature, expired, malformed, empty) is reported as
/// the same `Unauthorized` error.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}
