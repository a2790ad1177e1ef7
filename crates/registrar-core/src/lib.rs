//! # Registrar Core
//!
//! Core types, errors, and utilities for the Registrar API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error taxonomy with HTTP response conversion
//! - [`pagination`]: Page/limit handling for list endpoints
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Deserialization helpers for request bodies
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::errors::AppError;
//! use registrar_core::pagination::PaginationParams;
//! use registrar_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found("Student not found");
//!
//! let hash = hash_password("secure_password")?;
//!
//! let window = PaginationParams::default().window(5, 100);
//! assert_eq!(window.offset, 0);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, FieldError};
pub use pagination::{PageWindow, PaginationParams, total_pages};
pub use password::{hash_password, verify_password};
