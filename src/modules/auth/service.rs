use registrar_auth::create_access_token;
use registrar_config::{JwtConfig, RegistrationConfig};
use registrar_core::{AppError, hash_password, verify_password};
use registrar_db::{StoreError, UserStore};
use registrar_models::{NewUser, Role, normalize_email};
use tracing::{info, instrument, warn};

use super::model::{LoginRequest, RegisterRequest};

pub const USER_EXISTS_MESSAGE: &str = "User already exists";

pub struct AuthService;

impl AuthService {
    /// Role granted to a new account. The requested role is ignored unless
    /// self-assigned roles are enabled.
    pub fn resolve_role(requested: Option<&str>, registration: RegistrationConfig) -> Role {
        match requested {
            Some(name) if registration.allow_self_assigned_role => Role::from_name(name),
            _ => Role::User,
        }
    }

    /// Creates an account and returns a token for it.
    #[instrument(skip(users, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn register(
        users: &dyn UserStore,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
        registration: RegistrationConfig,
    ) -> Result<String, AppError> {
        let email = normalize_email(&dto.email);

        if users.find_by_email(&email).await?.is_some() {
            warn!("Registration rejected: email already in use");
            return Err(AppError::conflict(USER_EXISTS_MESSAGE));
        }

        let role = Self::resolve_role(dto.role.as_deref(), registration);
        let password_hash = hash_password(&dto.password)?;

        let user = users
            .create(NewUser {
                name: dto.name.trim().to_string(),
                email,
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateKey { .. } => AppError::conflict(USER_EXISTS_MESSAGE),
                e => AppError::internal(e),
            })?;

        info!(user.id = %user.id, user.role = %user.role, "User registered");

        create_access_token(user.id, &user.email, user.role, jwt_config)
    }

    /// Checks credentials and returns a token. Unknown emails and wrong
    /// passwords fail the same way.
    #[instrument(skip(users, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        users: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        let email = normalize_email(&dto.email);

        let Some(user) = users.find_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            warn!(user.id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials());
        }

        info!(user.id = %user.id, "User logged in");

        create_access_token(user.id, &user.email, user.role, jwt_config)
    }
}
