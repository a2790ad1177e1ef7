//! Process-local stores.
//!
//! Uniqueness is checked and the write applied under one write lock, so two
//! concurrent creates with the same email cannot both succeed. Stored-value
//! bounds match the `students` table checks.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use registrar_models::students::{MAX_GPA, MAX_YEAR, MIN_GPA};
use registrar_models::{
    NewStudent, NewUser, Student, StudentChanges, StudentFilter, StudentId, User, UserId,
};
use tokio::sync::RwLock;

use crate::store::{StoreError, StudentStore, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateKey { field: "email" });
        }

        let user = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}

/// Records are kept in insertion order, which is creation order.
#[derive(Default)]
pub struct MemoryStudentStore {
    students: RwLock<Vec<Student>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// First unique field of `candidate` already used by a record other than
/// `skip`.
fn conflicting_field(
    students: &[Student],
    candidate: &Student,
    skip: Option<StudentId>,
) -> Option<&'static str> {
    students
        .iter()
        .filter(|s| Some(s.id) != skip)
        .find_map(|s| {
            if s.student_id == candidate.student_id {
                Some("studentId")
            } else if s.email == candidate.email {
                Some("email")
            } else if s.phone == candidate.phone {
                Some("phone")
            } else {
                None
            }
        })
}

/// Field of `student` outside the bounds the `students` table enforces.
/// `year` 0 is storable even though the API never writes it.
fn out_of_bounds(student: &Student) -> Option<&'static str> {
    if !(0..=MAX_YEAR).contains(&student.year) {
        Some("year")
    } else if !(MIN_GPA..=MAX_GPA).contains(&student.gpa) {
        Some("gpa")
    } else {
        None
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn create(&self, student: NewStudent) -> Result<Student, StoreError> {
        let now = Utc::now();
        let record = Student {
            id: StudentId::new(),
            student_id: student.student_id,
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            phone: student.phone,
            course: student.course,
            year: student.year,
            gpa: student.gpa,
            address: student.address,
            created_at: now,
            updated_at: now,
        };

        if let Some(field) = out_of_bounds(&record) {
            return Err(StoreError::CheckViolation { field });
        }

        let mut students = self.students.write().await;
        if let Some(field) = conflicting_field(&students, &record, None) {
            return Err(StoreError::DuplicateKey { field });
        }
        students.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        let students = self.students.read().await;
        Ok(students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_email_or_student_id(
        &self,
        email: &str,
        student_id: &str,
    ) -> Result<Option<Student>, StoreError> {
        let students = self.students.read().await;
        Ok(students
            .iter()
            .find(|s| s.email == email || s.student_id == student_id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &StudentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, StoreError> {
        let students = self.students.read().await;
        Ok(students
            .iter()
            .filter(|s| filter.matches(s))
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &StudentFilter) -> Result<i64, StoreError> {
        let students = self.students.read().await;
        Ok(students.iter().filter(|s| filter.matches(s)).count() as i64)
    }

    async fn update(
        &self,
        id: StudentId,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError> {
        let mut students = self.students.write().await;
        let Some(index) = students.iter().position(|s| s.id == id) else {
            return Ok(None);
        };

        let mut updated = students[index].clone();
        changes.apply_to(&mut updated);
        if let Some(field) = out_of_bounds(&updated) {
            return Err(StoreError::CheckViolation { field });
        }
        if let Some(field) = conflicting_field(&students, &updated, Some(id)) {
            return Err(StoreError::DuplicateKey { field });
        }

        updated.updated_at = Utc::now();
        students[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StoreError> {
        let mut students = self.students.write().await;
        let before = students.len();
        students.retain(|s| s.id != id);
        Ok(students.len() < before)
    }
}
