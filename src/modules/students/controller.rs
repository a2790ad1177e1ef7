use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use registrar_core::AppError;
use registrar_core::errors::ErrorResponse;
use registrar_models::MessageResponse;
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::modules::students::model::{
    CreateStudentDto, CreateStudentResponse, PaginatedStudentsResponse, Student,
    StudentQueryParams, UpdateStudentDto, UpdateStudentResponse,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Add a student
///
/// Admin only.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student added successfully", body = CreateStudentResponse),
        (status = 400, description = "Validation error or student already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(caller.id = %admin.id))]
pub async fn create_student(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<CreateStudentResponse>), AppError> {
    let student = StudentService::create_student(state.students.as_ref(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateStudentResponse {
            success: true,
            message: "Student added successfully".to_string(),
            student,
        }),
    ))
}

/// List students with pagination, name search and course filter
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "Page of students", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(caller.id = %auth_user.id))]
pub async fn get_students(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let page =
        StudentService::get_students(state.students.as_ref(), &params, state.pagination_config)
            .await?;
    Ok(Json(page))
}

/// Get a student by ID
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student record ID")
    ),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(caller.id = %auth_user.id))]
pub async fn get_student(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(state.students.as_ref(), &id).await?;
    Ok(Json(student))
}

/// Update a student
///
/// Admin only. Only the fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student record ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = UpdateStudentResponse),
        (status = 400, description = "Validation error or duplicate value", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(caller.id = %admin.id))]
pub async fn update_student(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<UpdateStudentResponse>, AppError> {
    let student = StudentService::update_student(state.students.as_ref(), &id, dto).await?;

    Ok(Json(UpdateStudentResponse {
        success: true,
        message: "Student updated successfully".to_string(),
        update_stu: student,
    }))
}

/// Delete a student
///
/// Admin only. Deletion is permanent.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student record ID")
    ),
    responses(
        (status = 200, description = "Student deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state), fields(caller.id = %admin.id))]
pub async fn delete_student(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_student(state.students.as_ref(), &id).await?;
    Ok(Json(MessageResponse::new("Student deleted successfully")))
}
