//! Pagination settings for list endpoints.
//!
//! - `PAGINATION_DEFAULT_LIMIT`: page size when the caller gives none (default: 5)
//! - `PAGINATION_MAX_LIMIT`: largest page a caller may request (default: 100)

use crate::env_parse;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            max_limit: 100,
        }
    }
}

impl PaginationConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_limit = env_parse("PAGINATION_MAX_LIMIT", defaults.max_limit).max(1);
        let default_limit = env_parse("PAGINATION_DEFAULT_LIMIT", defaults.default_limit)
            .clamp(1, max_limit);

        Self {
            default_limit,
            max_limit,
        }
    }
}
