//! PostgreSQL-backed stores.

use async_trait::async_trait;
use registrar_models::{
    NewStudent, NewUser, Student, StudentChanges, StudentFilter, StudentId, User, UserId,
};
use sqlx::PgPool;
use tracing::{debug, error, instrument};

use crate::store::{StoreError, StudentStore, UserStore};

const STUDENT_COLUMNS: &str = "id, student_id, first_name, last_name, email, phone, course, \
     year, gpa, address, created_at, updated_at";

/// Maps a failed write to [`StoreError`], turning unique and check
/// violations into errors named after the offending field.
fn map_write_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        let field = match db_err.constraint() {
            Some("students_student_id_key") => "studentId",
            Some("students_phone_key") => "phone",
            _ => "email",
        };
        return StoreError::DuplicateKey { field };
    }

    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_check_violation()
    {
        let field = match db_err.constraint() {
            Some("students_year_check") => "year",
            Some("students_gpa_check") => "gpa",
            _ => "course",
        };
        return StoreError::CheckViolation { field };
    }

    error!(error = %e, "Database error on write");
    StoreError::Database(e)
}

/// Escapes LIKE metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds the WHERE clause for a filter. Returns the clause and the values
/// to bind to its placeholders, in order.
fn filter_clause(filter: &StudentFilter) -> (String, Vec<String>) {
    let mut where_clause = String::from(" WHERE 1=1");
    let mut params = Vec::new();

    if let Some(course) = &filter.course {
        params.push(course.clone());
        where_clause.push_str(&format!(" AND course = ${}", params.len()));
    }

    if let Some(search) = &filter.search {
        params.push(format!("%{}%", escape_like(search)));
        let n = params.len();
        where_clause.push_str(&format!(
            " AND (first_name ILIKE ${n} OR last_name ILIKE ${n})"
        ));
    }

    (where_clause, params)
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self, user), fields(db.operation = "INSERT", db.table = "users"))]
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(UserId::new())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(map_write_error)
    }
}

#[derive(Clone)]
pub struct PgStudentStore {
    db: PgPool,
}

impl PgStudentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    #[instrument(skip(self, student), fields(db.operation = "INSERT", db.table = "students"))]
    async fn create(&self, student: NewStudent) -> Result<Student, StoreError> {
        let query = format!(
            r#"
            INSERT INTO students
                (id, student_id, first_name, last_name, email, phone, course, year, gpa, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {STUDENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Student>(&query)
            .bind(StudentId::new())
            .bind(&student.student_id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .bind(&student.phone)
            .bind(student.course.as_str())
            .bind(student.year)
            .bind(student.gpa)
            .bind(&student.address)
            .fetch_one(&self.db)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "students"))]
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(student)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "students"))]
    async fn find_by_email_or_student_id(
        &self,
        email: &str,
        student_id: &str,
    ) -> Result<Option<Student>, StoreError> {
        let query = format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE email = $1 OR student_id = $2 LIMIT 1"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(email)
            .bind(student_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(student)
    }

    #[instrument(skip(self, filter), fields(db.operation = "SELECT", db.table = "students"))]
    async fn list(
        &self,
        filter: &StudentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, StoreError> {
        debug!(
            limit = %limit,
            offset = %offset,
            filter.search = ?filter.search,
            filter.course = ?filter.course,
            "Fetching students with pagination"
        );

        let (where_clause, params) = filter_clause(filter);
        let query = format!(
            "SELECT {STUDENT_COLUMNS} FROM students{where_clause} \
             ORDER BY created_at, id LIMIT ${} OFFSET ${}",
            params.len() + 1,
            params.len() + 2
        );

        let mut data_sql = sqlx::query_as::<_, Student>(&query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let students = data_sql
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching students");
                e
            })?;

        Ok(students)
    }

    #[instrument(skip(self, filter), fields(db.operation = "SELECT", db.table = "students"))]
    async fn count(&self, filter: &StudentFilter) -> Result<i64, StoreError> {
        let (where_clause, params) = filter_clause(filter);
        let query = format!("SELECT COUNT(*) FROM students{where_clause}");

        let mut count_sql = sqlx::query_scalar::<_, i64>(&query);
        for param in params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(&self.db).await.map_err(|e| {
            error!(error = %e, "Database error counting students");
            e
        })?;

        Ok(total)
    }

    #[instrument(skip(self, changes), fields(student.id = %id, db.operation = "UPDATE", db.table = "students"))]
    async fn update(
        &self,
        id: StudentId,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError> {
        let query = format!(
            r#"
            UPDATE students SET
                student_id = COALESCE($2, student_id),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                course = COALESCE($7, course),
                year = COALESCE($8, year),
                gpa = COALESCE($9, gpa),
                address = COALESCE($10, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&changes.student_id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.email)
            .bind(&changes.phone)
            .bind(changes.course.map(|c| c.as_str()))
            .bind(changes.year)
            .bind(changes.gpa)
            .bind(&changes.address)
            .fetch_optional(&self.db)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self), fields(student.id = %id, db.operation = "DELETE", db.table = "students"))]
    async fn delete(&self, id: StudentId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
