//! Feature modules.
//!
//! Each module is split the same way:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic over the stores
//! - `model.rs`: request/response types
//! - `router.rs`: Axum router configuration

pub mod auth;
pub mod students;
