use registrar_core::FieldError;
use registrar_core::errors::ErrorResponse;
use registrar_models::{
    AuthResponse, CreateStudentDto, CreateStudentResponse, LoginRequest, MessageResponse,
    PaginatedStudentsResponse, RegisterRequest, Role, Student, UpdateStudentDto,
    UpdateStudentResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
    ),
    components(
        schemas(
            Role,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            MessageResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            CreateStudentResponse,
            UpdateStudentResponse,
            PaginatedStudentsResponse,
            ErrorResponse,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Students", description = "Student records")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "Student records REST API built with Rust, Axum and PostgreSQL, with JWT authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
