mod common;

use axum::http::StatusCode;
use common::{TestApp, error_fields, jwt_config, student_payload};
use registrar::registrar_auth::create_token_with_ttl;
use registrar::registrar_config::PaginationConfig;
use registrar::registrar_models::{Role, UserId};
use serde_json::{Value, json};

const MISSING_ID: &str = "/api/students/00000000-0000-0000-0000-000000000000";

fn names(body: &Value) -> Vec<String> {
    body["students"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["firstName"].as_str().unwrap().to_string())
        .collect()
}

async fn total(app: &TestApp, token: &str) -> i64 {
    let (_, body) = app.request("GET", "/api/students", Some(token), None).await;
    body["totalStudents"].as_i64().unwrap()
}

#[tokio::test]
async fn test_requires_bearer_token() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/api/students", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .request("GET", "/api/students", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new();
    let token =
        create_token_with_ttl(UserId::new(), "admin@example.com", Role::Admin, -3600, &jwt_config())
            .unwrap();

    let (status, _) = app.request("GET", "/api/students", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_creates_student() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let (status, body) = app
        .request("POST", "/api/students", Some(&token), Some(student_payload(1)))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Student added successfully");

    let student = &body["student"];
    assert!(student["id"].is_string());
    assert_eq!(student["studentId"], "S001");
    assert_eq!(student["firstName"], "First1");
    assert_eq!(student["email"], "student1@example.com");
    assert_eq!(student["course"], "Computer Science");
    assert_eq!(student["year"], 2);
    assert_eq!(student["gpa"], 8.5);
    assert!(student["createdAt"].is_string());
    assert!(student["updatedAt"].is_string());
}

#[tokio::test]
async fn test_padded_email_is_normalized() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let mut payload = student_payload(1);
    payload["email"] = json!(" Student1@Example.com ");
    let student = app.create_student(&token, payload).await;
    assert_eq!(student["email"], "student1@example.com");

    let mut duplicate = student_payload(2);
    duplicate["email"] = json!("\tSTUDENT1@example.com");
    let (status, body) = app
        .request("POST", "/api/students", Some(&token), Some(duplicate))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student already exists");
}

#[tokio::test]
async fn test_non_admin_cannot_write() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let user = app.user_token().await;
    let student = app.create_student(&admin, student_payload(1)).await;
    let uri = format!("/api/students/{}", student["id"].as_str().unwrap());

    let (status, body) = app
        .request("POST", "/api/students", Some(&user), Some(student_payload(2)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    // Forbidden wins over an invalid body.
    let (status, _) = app
        .request("POST", "/api/students", Some(&user), Some(json!({ "year": 9 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request("PUT", &uri, Some(&user), Some(json!({ "gpa": 1.0 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("DELETE", &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(total(&app, &admin).await, 1);
}

#[tokio::test]
async fn test_user_can_read() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let user = app.user_token().await;
    let student = app.create_student(&admin, student_payload(1)).await;

    let (status, body) = app.request("GET", "/api/students", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalStudents"], 1);

    let uri = format!("/api/students/{}", student["id"].as_str().unwrap());
    let (status, body) = app.request("GET", &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, student);
}

#[tokio::test]
async fn test_unknown_course_rejected_and_not_persisted() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let mut payload = student_payload(1);
    payload["course"] = json!("Astrophysics");
    let (status, body) = app
        .request("POST", "/api/students", Some(&token), Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["course"]);
    assert_eq!(total(&app, &token).await, 0);
}

#[tokio::test]
async fn test_year_bounds() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    for year in [0, 5] {
        let mut payload = student_payload(1);
        payload["year"] = json!(year);
        let (status, body) = app
            .request("POST", "/api/students", Some(&token), Some(payload))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "year {}", year);
        assert_eq!(error_fields(&body), vec!["year"]);
    }

    let mut payload = student_payload(1);
    payload["year"] = json!(4);
    let (status, _) = app
        .request("POST", "/api/students", Some(&token), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_gpa_bounds() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let mut payload = student_payload(1);
    payload["gpa"] = json!(10.5);
    let (status, body) = app
        .request("POST", "/api/students", Some(&token), Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["gpa"]);
}

#[tokio::test]
async fn test_missing_fields_all_reported() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let (status, body) = app
        .request("POST", "/api/students", Some(&token), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(
        error_fields(&body),
        vec![
            "course",
            "email",
            "firstName",
            "gpa",
            "lastName",
            "phone",
            "studentId",
            "year"
        ]
    );
}

#[tokio::test]
async fn test_duplicate_student_rejected() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    app.create_student(&token, student_payload(1)).await;

    let mut same_email = student_payload(2);
    same_email["email"] = json!("STUDENT1@example.com");
    let (status, body) = app
        .request("POST", "/api/students", Some(&token), Some(same_email))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student already exists");

    let mut same_code = student_payload(3);
    same_code["studentId"] = json!("S001");
    let (status, _) = app
        .request("POST", "/api/students", Some(&token), Some(same_code))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut same_phone = student_payload(4);
    same_phone["phone"] = json!("5550000001");
    let (status, body) = app
        .request("POST", "/api/students", Some(&token), Some(same_phone))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student already exists");

    assert_eq!(total(&app, &token).await, 1);
}

#[tokio::test]
async fn test_pagination_second_page() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    for n in 1..=12 {
        app.create_student(&token, student_payload(n)).await;
    }

    let (status, body) = app
        .request("GET", "/api/students?page=2&limit=5", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalStudents"], 12);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(
        names(&body),
        vec!["First6", "First7", "First8", "First9", "First10"]
    );

    let (_, body) = app
        .request("GET", "/api/students?page=3&limit=5", Some(&token), None)
        .await;
    assert_eq!(names(&body), vec!["First11", "First12"]);

    let (_, body) = app
        .request("GET", "/api/students?page=4&limit=5", Some(&token), None)
        .await;
    assert!(names(&body).is_empty());
    assert_eq!(body["totalStudents"], 12);
}

#[tokio::test]
async fn test_pagination_defaults_for_bad_values() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    for n in 1..=7 {
        app.create_student(&token, student_payload(n)).await;
    }

    let queries = [
        "",
        "?page=abc&limit=xyz",
        "?page=0&limit=0",
        "?page=-3&limit=",
        "?page=&limit=-1",
        "?page=2abc&limit=5x",
    ];
    for query in queries {
        let (status, body) = app
            .request("GET", &format!("/api/students{}", query), Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::OK, "query {:?}", query);
        assert_eq!(body["currentPage"], 1, "query {:?}", query);
        assert_eq!(body["totalPages"], 2, "query {:?}", query);
        assert_eq!(names(&body).len(), 5, "query {:?}", query);
    }
}

#[tokio::test]
async fn test_collection_accepts_trailing_slash() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let (status, _) = app
        .request("POST", "/api/students/", Some(&token), Some(student_payload(1)))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.request("GET", "/api/students/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalStudents"], 1);

    let (status, _) = app.request("GET", "/api/students/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_limit_capped_at_maximum() {
    let app = TestApp::with_pagination(PaginationConfig {
        default_limit: 2,
        max_limit: 3,
    });
    let token = app.admin_token().await;
    for n in 1..=5 {
        app.create_student(&token, student_payload(n)).await;
    }

    let (_, body) = app
        .request("GET", "/api/students?limit=1000", Some(&token), None)
        .await;
    assert_eq!(names(&body).len(), 3);
    assert_eq!(body["totalPages"], 2);

    let (_, body) = app.request("GET", "/api/students", Some(&token), None).await;
    assert_eq!(names(&body).len(), 2);
}

#[tokio::test]
async fn test_search_and_course_filter() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let people = [
        ("Anna", "Smith", "IT"),
        ("Brian", "Hanna", "Civil"),
        ("Carl", "Mann", "IT"),
        ("Diana", "Prince", "ECE"),
        ("Ed", "Stone", "IT"),
    ];
    for (n, (first, last, course)) in people.iter().enumerate() {
        let mut payload = student_payload(n);
        payload["firstName"] = json!(first);
        payload["lastName"] = json!(last);
        payload["course"] = json!(course);
        app.create_student(&token, payload).await;
    }

    // First or last name, any case.
    let (_, body) = app
        .request("GET", "/api/students?search=ANN", Some(&token), None)
        .await;
    assert_eq!(names(&body), vec!["Anna", "Brian", "Carl"]);
    assert_eq!(body["totalStudents"], 3);

    let (_, body) = app
        .request("GET", "/api/students?search=ann&course=IT", Some(&token), None)
        .await;
    assert_eq!(names(&body), vec!["Anna", "Carl"]);

    let (_, body) = app
        .request("GET", "/api/students?course=it", Some(&token), None)
        .await;
    assert_eq!(body["totalStudents"], 0);

    // Literal match, not a pattern.
    let (_, body) = app
        .request("GET", "/api/students?search=.%2A", Some(&token), None)
        .await;
    assert_eq!(body["totalStudents"], 0);

    let (_, body) = app
        .request("GET", "/api/students?search=&course=", Some(&token), None)
        .await;
    assert_eq!(body["totalStudents"], 5);
}

#[tokio::test]
async fn test_get_student_not_found() {
    let app = TestApp::new();
    let token = app.user_token().await;

    let (status, body) = app.request("GET", MISSING_ID, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");

    let (status, _) = app
        .request("GET", "/api/students/65f0c0ffee", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_student() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let student = app.create_student(&token, student_payload(1)).await;
    let uri = format!("/api/students/{}", student["id"].as_str().unwrap());

    let (status, body) = app
        .request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "gpa": 9.75, "course": "Mechanical", "email": "New@Example.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Student updated successfully");

    let updated = &body["updateStu"];
    assert_eq!(updated["id"], student["id"]);
    assert_eq!(updated["gpa"], 9.75);
    assert_eq!(updated["course"], "Mechanical");
    assert_eq!(updated["email"], "new@example.com");
    assert_eq!(updated["firstName"], student["firstName"]);
    assert_eq!(updated["createdAt"], student["createdAt"]);

    let (_, fetched) = app.request("GET", &uri, Some(&token), None).await;
    assert_eq!(&fetched, updated);
}

#[tokio::test]
async fn test_empty_update_is_a_no_op() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let student = app.create_student(&token, student_payload(1)).await;
    let uri = format!("/api/students/{}", student["id"].as_str().unwrap());

    let (status, body) = app.request("PUT", &uri, Some(&token), Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updateStu"], student);
}

#[tokio::test]
async fn test_update_validation_and_conflicts() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let student = app.create_student(&token, student_payload(1)).await;
    app.create_student(&token, student_payload(2)).await;
    let uri = format!("/api/students/{}", student["id"].as_str().unwrap());

    let (status, body) = app
        .request("PUT", &uri, Some(&token), Some(json!({ "year": 0, "firstName": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["firstName", "year"]);

    let (status, body) = app
        .request("PUT", &uri, Some(&token), Some(json!({ "course": "Astrophysics" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["course"]);

    let (status, body) = app
        .request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "email": "student2@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student already exists");

    let (status, _) = app
        .request("PUT", MISSING_ID, Some(&token), Some(json!({ "gpa": 5.0 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing was changed by the failed attempts.
    let (_, fetched) = app.request("GET", &uri, Some(&token), None).await;
    assert_eq!(fetched, student);
}

#[tokio::test]
async fn test_delete_student() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let student = app.create_student(&token, student_payload(1)).await;
    let uri = format!("/api/students/{}", student["id"].as_str().unwrap());

    let (status, body) = app.request("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Student deleted successfully" }));

    let (status, _) = app.request("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.request("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");
}

#[tokio::test]
async fn test_concurrent_duplicate_creates() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let post = || app.request("POST", "/api/students", Some(&token), Some(student_payload(1)));

    let (a, b, c, d) = tokio::join!(post(), post(), post(), post());
    let statuses = [a.0, b.0, c.0, d.0];

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    assert_eq!(created, 1);
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count(),
        3
    );
    assert_eq!(total(&app, &token).await, 1);
}
