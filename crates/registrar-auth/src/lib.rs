//! # Registrar Auth
//!
//! Token issuance and verification for the Registrar API.
//!
//! Tokens are HS256 JWTs carrying the caller's id, email and role. They are
//! not stored anywhere: a token is valid exactly when its signature checks
//! out against the configured secret and its `exp` has not passed. There is
//! no revocation.
//!
//! - [`claims`]: the claim set embedded in every token
//! - [`jwt`]: creation and verification
//!
//! # Example
//!
//! ```ignore
//! use registrar_auth::{create_access_token, verify_token};
//! use registrar_config::JwtConfig;
//! use registrar_models::Role;
//!
//! let config = JwtConfig::from_env();
//!
//! let token = create_access_token(user_id, "user@example.com", Role::User, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, Role::User);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, create_token_with_ttl, verify_token};
