//! User domain models.
//!
//! Users are the accounts that authenticate against the API. They are
//! created on registration (or by the admin CLI) and never modified by the
//! HTTP API afterwards.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

use crate::ids::UserId;

/// Access level of an account.
///
/// Only `Admin` may create, update or delete students. Any role name other
/// than `admin` is treated as a standard user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role::from_name(&name)
    }
}

/// An account in the credential store.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// bcrypt hash; never serialized.
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A user ready to be persisted. The email must already be normalized and
/// the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}
