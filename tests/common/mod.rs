use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use registrar::registrar_auth::create_access_token;
use registrar::registrar_config::{
    CorsConfig, JwtConfig, PaginationConfig, RegistrationConfig,
};
use registrar::registrar_core::hash_password;
use registrar::registrar_db::memory::{MemoryStudentStore, MemoryUserStore};
use registrar::registrar_models::{NewUser, Role};
use registrar::router::init_router;
use registrar::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-at-least-32-characters-long";
pub const TEST_PASSWORD: &str = "password123";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry: 86_400,
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        Self::with_config(RegistrationConfig::default(), PaginationConfig::default())
    }

    pub fn with_registration(registration_config: RegistrationConfig) -> Self {
        Self::with_config(registration_config, PaginationConfig::default())
    }

    pub fn with_pagination(pagination_config: PaginationConfig) -> Self {
        Self::with_config(RegistrationConfig::default(), pagination_config)
    }

    fn with_config(
        registration_config: RegistrationConfig,
        pagination_config: PaginationConfig,
    ) -> Self {
        let state = AppState {
            users: Arc::new(MemoryUserStore::new()),
            students: Arc::new(MemoryStudentStore::new()),
            jwt_config: jwt_config(),
            cors_config: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            pagination_config,
            registration_config,
        };
        let router = init_router(state.clone());

        Self { state, router }
    }

    /// Sends a request and returns the status and the JSON body
    /// (`Value::Null` when the body is empty or not JSON).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        match body {
            Some(body) => {
                self.raw_request(method, uri, token, Some("application/json"), body.to_string())
                    .await
            }
            None => self.raw_request(method, uri, token, None, String::new()).await,
        }
    }

    pub async fn raw_request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: String,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    /// Inserts an account straight into the store and returns a token for it.
    pub async fn token_for(&self, email: &str, role: Role) -> String {
        let user = self
            .state
            .users
            .create(NewUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                role,
            })
            .await
            .unwrap();

        create_access_token(user.id, &user.email, user.role, &self.state.jwt_config).unwrap()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("admin@example.com", Role::Admin).await
    }

    pub async fn user_token(&self) -> String {
        self.token_for("user@example.com", Role::User).await
    }

    /// Creates a student through the API and returns the response body.
    pub async fn create_student(&self, token: &str, payload: Value) -> Value {
        let (status, body) = self
            .request("POST", "/api/students", Some(token), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["student"].clone()
    }
}

#[allow(dead_code)]
pub fn student_payload(n: usize) -> Value {
    json!({
        "studentId": format!("S{:03}", n),
        "firstName": format!("First{}", n),
        "lastName": "Doe",
        "email": format!("student{}@example.com", n),
        "phone": format!("555000{:04}", n),
        "course": "Computer Science",
        "year": 2,
        "gpa": 8.5,
        "address": "1 Main St"
    })
}

#[allow(dead_code)]
pub fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
