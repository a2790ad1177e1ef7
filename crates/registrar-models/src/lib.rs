//! # Registrar Models
//!
//! Domain models and DTOs for the Registrar API.
//!
//! # Modules
//!
//! - [`auth`]: Registration and login requests/responses
//! - [`ids`]: Strongly-typed entity IDs
//! - [`students`]: Student records, write DTOs and list queries
//! - [`users`]: Accounts and roles
//!
//! # Example
//!
//! ```ignore
//! use registrar_models::students::{CreateStudentDto, NewStudent};
//! use validator::Validate;
//!
//! dto.validate()?;
//! let new_student = NewStudent::try_from(dto)?;
//! ```

pub mod auth;
pub mod ids;
pub mod students;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
pub use ids::{StudentId, UserId};
pub use students::{
    Course, CreateStudentDto, CreateStudentResponse, NewStudent, PaginatedStudentsResponse,
    Student, StudentChanges, StudentFilter, StudentQueryParams, UpdateStudentDto,
    UpdateStudentResponse,
};
pub use users::{NewUser, Role, User};

/// Trims and lowercases an email address. Both users and students store
/// emails in this form so uniqueness is case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
