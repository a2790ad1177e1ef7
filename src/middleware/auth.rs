use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use registrar_auth::verify_token;
use registrar_config::JwtConfig;
use registrar_core::AppError;
use registrar_models::{Role, UserId};

use crate::state::AppState;

/// The caller behind a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Resolves the caller from the `Authorization` header.
    pub fn from_headers(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<Self, AppError> {
        let auth_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, jwt_config)?;

        Ok(AuthUser {
            id: claims.user_id()?,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by `require_auth`.
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        AuthUser::from_headers(&parts.headers, &state.jwt_config)
    }
}

/// Rejects requests without a valid bearer token and attaches the caller to
/// the request extensions.
///
/// ```rust,ignore
/// Router::new()
///     .merge(init_students_router())
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = AuthUser::from_headers(req.headers(), &state.jwt_config)?;
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

/// Generates an extractor that only admits callers holding the given role.
///
/// Extractors run in argument order, so placing one before a body extractor
/// makes the role check happen before the body is parsed or validated.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::registrar_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                if auth_user.role != $role {
                    return Err($crate::registrar_core::AppError::forbidden(format!(
                        "Access denied. Required role: {}",
                        $role
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireAdmin, Role::Admin);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use registrar_auth::{create_access_token, create_token_with_ttl};
    use registrar_core::ErrorKind;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 86_400,
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_resolves_identity_from_token() {
        let config = jwt_config();
        let id = UserId::new();
        let token = create_access_token(id, "admin@example.com", Role::Admin, &config).unwrap();

        let auth_user =
            AuthUser::from_headers(&headers_with(&format!("Bearer {}", token)), &config).unwrap();

        assert_eq!(
            auth_user,
            AuthUser {
                id,
                email: "admin@example.com".to_string(),
                role: Role::Admin,
            }
        );
        assert!(auth_user.is_admin());
    }

    #[test]
    fn test_missing_header() {
        let err = AuthUser::from_headers(&HeaderMap::new(), &jwt_config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_non_bearer_scheme() {
        let err = AuthUser::from_headers(&headers_with("Basic dXNlcjpwYXNz"), &jwt_config())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = AuthUser::from_headers(&headers_with("Bearer "), &jwt_config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_expired_token() {
        let config = jwt_config();
        let token =
            create_token_with_ttl(UserId::new(), "u@example.com", Role::User, -3600, &config)
                .unwrap();

        let err = AuthUser::from_headers(&headers_with(&format!("Bearer {}", token)), &config)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
