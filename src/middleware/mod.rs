//! Request middleware and extractors.
//!
//! # Authentication Flow
//!
//! 1. [`auth::require_auth`] runs in front of every protected route, checks the
//!    `Authorization: Bearer <token>` header and stores an [`auth::AuthUser`]
//!    in the request extensions.
//! 2. Handlers name what they need: `AuthUser` for any signed-in caller,
//!    `RequireAdmin` for writes.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireAdmin};
//!
//! async fn get_student(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! async fn delete_student(RequireAdmin(auth_user): RequireAdmin) -> impl IntoResponse {
//!     // Only executes for admins
//! }
//! ```

pub mod auth;
