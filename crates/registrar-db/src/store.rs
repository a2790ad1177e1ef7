//! Store traits shared by every backend.

use async_trait::async_trait;
use registrar_models::{
    NewStudent, NewUser, Student, StudentChanges, StudentFilter, StudentId, User,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. `field` is the JSON name
    /// of the offending field.
    #[error("duplicate value for {field}")]
    DuplicateKey { field: &'static str },
    /// A stored-value bound rejected the write (`year` 0-4, `gpa` 0-10).
    #[error("value out of range for {field}")]
    CheckViolation { field: &'static str },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}

/// Persisted accounts. Emails are expected to be normalized by the caller.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::DuplicateKey`] if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Persisted student records.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Fails with [`StoreError::DuplicateKey`] if `studentId`, email or
    /// phone is taken, and with [`StoreError::CheckViolation`] if a value is
    /// outside the stored bounds.
    async fn create(&self, student: NewStudent) -> Result<Student, StoreError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StoreError>;

    /// First record sharing either the email or the `studentId`.
    async fn find_by_email_or_student_id(
        &self,
        email: &str,
        student_id: &str,
    ) -> Result<Option<Student>, StoreError>;

    /// Matching records in creation order.
    async fn list(
        &self,
        filter: &StudentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, StoreError>;

    async fn count(&self, filter: &StudentFilter) -> Result<i64, StoreError>;

    /// Returns `None` if no record has this id.
    async fn update(
        &self,
        id: StudentId,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError>;

    /// Returns `false` if no record had this id.
    async fn delete(&self, id: StudentId) -> Result<bool, StoreError>;
}
