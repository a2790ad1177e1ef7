use axum::{Router, routing::get};

use crate::modules::students::controller::{
    create_student, delete_student, get_student, get_students, update_student,
};
use crate::state::AppState;

/// Student routes, mounted under `/api`. The collection answers with or
/// without a trailing slash.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/students", get(get_students).post(create_student))
        .route("/students/", get(get_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}
