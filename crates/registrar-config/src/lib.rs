//! # Registrar Config
//!
//! Configuration types for the Registrar API.
//!
//! Every structure is loaded once from environment variables at startup and
//! then passed around by value; nothing here is read lazily from globals.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address and storage backend selection
//! - [`pagination`]: list endpoint defaults and caps
//! - [`registration`]: self-registration policy
//! - [`logging`]: log level and file output
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

use std::env;
use std::str::FromStr;

pub mod cors;
pub mod jwt;
pub mod logging;
pub mod pagination;
pub mod registration;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use logging::LoggingConfig;
pub use pagination::PaginationConfig;
pub use registration::RegistrationConfig;
pub use server::{ServerConfig, StorageBackend};

/// Reads and parses an environment variable, falling back to `default` when
/// it is unset or does not parse.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v == "true" || v == "1" || v == "yes"
        })
        .unwrap_or(default)
}
