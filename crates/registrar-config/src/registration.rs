//! Self-registration policy.
//!
//! By default every account created through `POST /api/auth/register` gets the
//! standard `user` role, whatever the request asks for. Admin accounts come
//! from the CLI. Setting `ALLOW_SELF_ASSIGNED_ROLE=true` restores the legacy
//! behavior where the caller picks its own role.

use crate::env_flag;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistrationConfig {
    pub allow_self_assigned_role: bool,
}

impl RegistrationConfig {
    pub fn from_env() -> Self {
        Self {
            allow_self_assigned_role: env_flag("ALLOW_SELF_ASSIGNED_ROLE", false),
        }
    }
}
