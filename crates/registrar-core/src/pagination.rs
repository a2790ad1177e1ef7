//! Page-based pagination for list endpoints.
//!
//! List endpoints accept `page` and `limit` query parameters:
//!
//! - `page`: 1-indexed page number (default: 1)
//! - `limit`: items per page (default supplied by the caller, capped at a maximum)
//!
//! Values that are missing, empty, non-numeric or not positive fall back to the
//! defaults instead of rejecting the request, so `?page=abc&limit=0` behaves
//! exactly like no parameters at all.
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::pagination::{PaginationParams, total_pages};
//!
//! // GET /api/students?page=2&limit=5
//! let params = PaginationParams { page: Some(2), limit: Some(5) };
//! let window = params.window(5, 100);
//!
//! assert_eq!(window.offset, 5);
//! assert_eq!(total_pages(12, window.limit), 3);
//! ```

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

/// Deserializes an optional query value into an optional i64.
///
/// Empty strings and values that don't parse as a whole are treated as
/// `None`; `"2abc"` is not read as 2.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, ToSchema)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    /// Items per page
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
}

/// The resolved slice of a result set that a request asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PaginationParams {
    /// Returns the page number, at least 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    /// Returns the effective limit.
    ///
    /// Non-positive or missing values use `default_limit`; the result is
    /// capped at `max_limit`.
    #[must_use]
    pub fn limit(&self, default_limit: i64, max_limit: i64) -> i64 {
        let max_limit = max_limit.max(1);
        self.limit
            .filter(|l| *l >= 1)
            .unwrap_or(default_limit)
            .clamp(1, max_limit)
    }

    #[must_use]
    pub fn window(&self, default_limit: i64, max_limit: i64) -> PageWindow {
        let page = self.page();
        let limit = self.limit(default_limit, max_limit);

        PageWindow {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }
}

/// Number of pages needed to show `total` items, `limit` at a time.
#[must_use]
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}
