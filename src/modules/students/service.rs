use registrar_config::PaginationConfig;
use registrar_core::{AppError, FieldError, total_pages};
use registrar_db::{StoreError, StudentStore};
use registrar_models::StudentId;
use tracing::{debug, info, instrument};

use super::model::{
    CreateStudentDto, NewStudent, PaginatedStudentsResponse, Student, StudentChanges,
    StudentQueryParams, UpdateStudentDto,
};

pub const STUDENT_EXISTS_MESSAGE: &str = "Student already exists";
pub const STUDENT_NOT_FOUND_MESSAGE: &str = "Student not found";

/// A malformed id can't name any record, so it is reported like a missing one.
fn parse_id(id: &str) -> Result<StudentId, AppError> {
    id.parse()
        .map_err(|_| AppError::not_found(STUDENT_NOT_FOUND_MESSAGE))
}

fn map_store_error(e: StoreError) -> AppError {
    match e {
        StoreError::DuplicateKey { field } => {
            debug!(field, "Unique constraint rejected student write");
            AppError::conflict(STUDENT_EXISTS_MESSAGE)
        }
        e => AppError::internal(e),
    }
}

pub struct StudentService;

impl StudentService {
    /// Expects a validated DTO.
    #[instrument(skip(students, dto), fields(student.student_id = %dto.student_id))]
    pub async fn create_student(
        students: &dyn StudentStore,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let new_student = NewStudent::try_from(dto).map_err(|e| {
            AppError::validation(vec![FieldError::new("course", e.to_string())])
        })?;

        if students
            .find_by_email_or_student_id(&new_student.email, &new_student.student_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(STUDENT_EXISTS_MESSAGE));
        }

        let student = students.create(new_student).await.map_err(map_store_error)?;
        info!(student.id = %student.id, "Student created");

        Ok(student)
    }

    #[instrument(skip(students, params))]
    pub async fn get_students(
        students: &dyn StudentStore,
        params: &StudentQueryParams,
        pagination: PaginationConfig,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let window = params
            .pagination()
            .window(pagination.default_limit, pagination.max_limit);
        let filter = params.filter();

        debug!(
            page = %window.page,
            limit = %window.limit,
            filter.search = ?filter.search,
            filter.course = ?filter.course,
            "Listing students"
        );

        let total = students.count(&filter).await?;
        let items = students.list(&filter, window.limit, window.offset).await?;

        Ok(PaginatedStudentsResponse {
            total_students: total,
            current_page: window.page,
            total_pages: total_pages(total, window.limit),
            students: items,
        })
    }

    #[instrument(skip(students))]
    pub async fn get_student(students: &dyn StudentStore, id: &str) -> Result<Student, AppError> {
        let id = parse_id(id)?;

        students
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND_MESSAGE))
    }

    /// Applies the provided fields. An empty update returns the record as is.
    #[instrument(skip(students, dto))]
    pub async fn update_student(
        students: &dyn StudentStore,
        id: &str,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let id = parse_id(id)?;
        let changes = StudentChanges::try_from(dto).map_err(|e| {
            AppError::validation(vec![FieldError::new("course", e.to_string())])
        })?;

        if changes.is_empty() {
            return students
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND_MESSAGE));
        }

        let student = students
            .update(id, changes)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND_MESSAGE))?;
        info!(student.id = %student.id, "Student updated");

        Ok(student)
    }

    #[instrument(skip(students))]
    pub async fn delete_student(students: &dyn StudentStore, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;

        if !students.delete(id).await? {
            return Err(AppError::not_found(STUDENT_NOT_FOUND_MESSAGE));
        }
        info!(student.id = %id, "Student deleted");

        Ok(())
    }
}
