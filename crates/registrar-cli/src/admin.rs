//! Admin account creation.

use registrar_core::hash_password;
use registrar_db::{StoreError, UserStore};
use registrar_models::{NewUser, RegisterRequest, Role, User, normalize_email};
use validator::Validate;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("a user with email {0} already exists")]
    AlreadyExists(String),
    #[error("failed to hash password")]
    Hash,
    #[error(transparent)]
    Store(StoreError),
}

/// Creates an account with the `admin` role. Input is checked with the same
/// rules as self-registration.
pub async fn create_admin(
    users: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AdminError> {
    let request = RegisterRequest {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
        role: None,
    };
    request.validate().map_err(|errors| {
        let messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();
        AdminError::Invalid(messages.join(", "))
    })?;

    let email = normalize_email(&request.email);
    if users
        .find_by_email(&email)
        .await
        .map_err(AdminError::Store)?
        .is_some()
    {
        return Err(AdminError::AlreadyExists(email));
    }

    let password_hash = hash_password(&request.password).map_err(|_| AdminError::Hash)?;

    users
        .create(NewUser {
            name: request.name,
            email: email.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await
        .map_err(|e| match e {
            StoreError::DuplicateKey { .. } => AdminError::AlreadyExists(email),
            e => AdminError::Store(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_core::verify_password;
    use registrar_db::memory::MemoryUserStore;

    #[tokio::test]
    async fn test_create_admin() {
        let users = MemoryUserStore::new();
        let admin = create_admin(&users, " Root ", "Root@Example.com", "s3cret")
            .await
            .unwrap();

        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.name, "Root");
        assert_eq!(admin.email, "root@example.com");
        assert!(verify_password("s3cret", &admin.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_admin_rejects_existing_email() {
        let users = MemoryUserStore::new();
        create_admin(&users, "Root", "root@example.com", "s3cret")
            .await
            .unwrap();

        let err = create_admin(&users, "Other", "ROOT@example.com", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_admin_validates_input() {
        let users = MemoryUserStore::new();
        let err = create_admin(&users, "Root", "not-an-email", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Invalid(_)));
    }
}
