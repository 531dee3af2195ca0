//! HTTP API Integration Tests
//!
//! Exercises the router with `tower::ServiceExt::oneshot` over an in-memory
//! database and a recording model.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use tutor_cascade::models::settings::AppConfig;
use tutor_cascade::services::tutor::TutorOrchestrator;
use tutor_cascade::storage::{Database, ExplanationCache};
use tutor_cascade::{build_router, AppState, SharedState};

use crate::support::{png_bytes, server_error, RecordingModel};

const BOUNDARY: &str = "tutor-test-boundary";

struct TestApp {
    state: SharedState,
    model: Arc<RecordingModel>,
    _dir: TempDir,
}

impl TestApp {
    fn new(model: Arc<RecordingModel>) -> Self {
        Self::with_config(model, |_| {})
    }

    fn with_config(model: Arc<RecordingModel>, tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = TempDir::new().unwrap();
        let subjects_path = dir.path().join("subjects.json");
        std::fs::write(
            &subjects_path,
            r#"{"subjects":[
                {"name":"Fractions","category":"Mathematics","subcategory":"Arithmetic"},
                {"name":"Equations","category":"Mathematics","subcategory":"Algebra"},
                {"name":"Cells","category":"Science","subcategory":"Biology"}
            ]}"#,
        )
        .unwrap();

        let mut config = AppConfig {
            subjects_path: subjects_path.to_string_lossy().into_owned(),
            explanation_cache_path: dir.path().join("cache.json").to_string_lossy().into_owned(),
            jwt_secret: "integration-secret".to_string(),
            ..AppConfig::default()
        };
        tweak(&mut config);
        let db = Database::new_in_memory().unwrap();
        let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();
        let cache = ExplanationCache::load(&config.explanation_cache_path).unwrap();

        Self {
            state: AppState::new(config, db, orchestrator, cache).into_shared(),
            model,
            _dir: dir,
        }
    }

    fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn signup_and_login(&self, username: &str) -> String {
        let (status, _) = self
            .send(json_request(
                "POST",
                "/signup",
                None,
                json!({"username": username, "email": format!("{}@example.com", username), "password": "pw123"}),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self
            .send(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!("username={}&password=pw123", username)))
                    .unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");
        body["access_token"].as_str().unwrap().to_string()
    }
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn chat_request(token: &str, fields: &[(&str, &str)]) -> Request<Body> {
    chat_request_with_image(token, fields, None)
}

fn chat_request_with_image(
    token: &str,
    fields: &[(&str, &str)],
    image: Option<&[u8]>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"upload.png\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::post("/chat")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

// ============================================================================
// Health and accounts
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(RecordingModel::replying(&[]));
    let (status, body) = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": true}));
}

#[tokio::test]
async fn test_signup_login_and_me() {
    let app = TestApp::new(RecordingModel::replying(&[]));
    let token = app.signup_and_login("ada").await;

    let (status, body) = app.send(authed("GET", "/signup/me", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ada");
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let app = TestApp::new(RecordingModel::replying(&[]));
    app.signup_and_login("ada").await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/signup",
            None,
            json!({"username": "ada", "email": "other@example.com", "password": "x"}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username already registered");

    let (status, body) = app
        .send(json_request(
            "POST",
            "/signup",
            None,
            json!({"username": "grace", "email": "ada@example.com", "password": "x"}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already registered");
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new(RecordingModel::replying(&[]));
    app.signup_and_login("ada").await;

    let response = app
        .router()
        .oneshot(
            Request::post("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=ada&password=wrong"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_protected_routes_need_token() {
    let app = TestApp::new(RecordingModel::replying(&[]));
    for uri in ["/signup/me", "/assessment/profile", "/chat/history"] {
        let (status, body) = app
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["detail"], "Could not validate credentials");
    }

    let (status, _) = app.send(authed("GET", "/signup/me", "garbage.token.value")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Learning profile
// ============================================================================

#[tokio::test]
async fn test_profile_lifecycle() {
    let app = TestApp::new(RecordingModel::replying(&[]));
    let token = app.signup_and_login("ada").await;

    let (status, body) = app.send(authed("GET", "/assessment/profile", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Learning profile not found");

    let profile = json!({"verbal_score": 1.5, "non_verbal_score": 0.5, "self_assessment": 4, "age": 12});
    let (status, body) = app
        .send(json_request("POST", "/assessment/profile", Some(&token), profile.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verbal_score"], 1.5);

    let (status, body) = app
        .send(json_request("POST", "/assessment/profile", Some(&token), profile))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Learning profile already exists");

    let (status, body) = app
        .send(json_request(
            "PUT",
            "/assessment/profile",
            Some(&token),
            json!({"self_assessment": 9}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["self_assessment"], 9);
    assert_eq!(body["age"], 12);

    let (status, body) = app.send(authed("DELETE", "/assessment/profile", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Learning profile deleted successfully");

    let (status, _) = app.send(authed("DELETE", "/assessment/profile", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_turn_is_answered_and_stored() {
    let app = TestApp::new(RecordingModel::replying(&["PLAN", "REPORT", "Here is how rain forms."]));
    let token = app.signup_and_login("ada").await;

    app.send(json_request(
        "POST",
        "/assessment/profile",
        Some(&token),
        json!({"verbal_score": 2.0, "non_verbal_score": 1.0, "self_assessment": 3, "age": 10}),
    ))
    .await;

    let (status, session) = app
        .send(json_request("POST", "/api/chat/sessions", Some(&token), json!({"title": "Weather"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    let session_id = session["id"].as_str().unwrap().to_string();
    assert_eq!(session["title"], "Weather");

    let (status, body) = app
        .send(chat_request(
            &token,
            &[("message", "How does rain form?"), ("session_id", &session_id)],
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": "Here is how rain forms."}));

    let synthesis = &app.model.prompts()[2];
    assert!(synthesis.contains("Verbal Score: 2.0/2"));
    assert!(synthesis.contains("Provide additional encouragement and positive reinforcement."));

    let (status, history) = app.send(authed("GET", "/chat/history", &token)).await;
    assert_eq!(status, StatusCode::OK);
    let stored = &history["sessions"][0]["messages"][0];
    assert_eq!(stored["content"], "How does rain form?");
    assert_eq!(stored["response"], "Here is how rain forms.");
    assert_eq!(stored["planning_analysis"], "PLAN");
    assert_eq!(stored["final_analysis"], "REPORT");
}

#[tokio::test]
async fn test_empty_model_text_gets_fallback() {
    let app = TestApp::new(RecordingModel::replying(&["plan", "report", ""]));
    let token = app.signup_and_login("ada").await;

    let (status, body) = app
        .send(chat_request(&token, &[("message", "What is a comet?")]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "I'm sorry, I couldn't generate a response.");
}

#[tokio::test]
async fn test_pipeline_error_is_500_with_wrapped_message() {
    let app = TestApp::new(RecordingModel::new(vec![Err(server_error("model offline"))]));
    let token = app.signup_and_login("ada").await;

    let (status, body) = app
        .send(chat_request(&token, &[("message", "What is a comet?")]))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to get chat response: "));
    assert!(detail.contains("model offline"));
}

#[tokio::test]
async fn test_chat_requires_message_field() {
    let app = TestApp::new(RecordingModel::replying(&[]));
    let token = app.signup_and_login("ada").await;

    let (status, _) = app.send(chat_request(&token, &[("session_id", "")])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn test_chat_with_image_runs_vision_first() {
    let app = TestApp::new(RecordingModel::replying(&["a bar chart", "P", "A", "S"]));
    let token = app.signup_and_login("ada").await;

    let image = png_bytes();
    let (status, body) = app
        .send(chat_request_with_image(
            &token,
            &[("message", "What does this chart show?")],
            Some(&image),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "S");

    let calls = app.model.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls[0].had_image);
    assert!(calls[1].prompt.contains("Image Analysis: a bar chart"));
}

#[tokio::test]
async fn test_undecodable_upload_falls_back_to_text() {
    let app = TestApp::new(RecordingModel::replying(&["P", "A", "S"]));
    let token = app.signup_and_login("ada").await;

    let (status, body) = app
        .send(chat_request_with_image(
            &token,
            &[("message", "What is this?")],
            Some(b"definitely not an image"),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "S");
    assert!(app.model.calls().iter().all(|c| !c.had_image));
}

#[tokio::test]
async fn test_photo_sized_upload_is_accepted() {
    let app = TestApp::new(RecordingModel::replying(&["P", "A", "S"]));
    let token = app.signup_and_login("ada").await;

    let upload = vec![0xAB_u8; 3 * 1024 * 1024];
    let (status, body) = app
        .send(chat_request_with_image(
            &token,
            &[("message", "Can you read my homework?")],
            Some(&upload),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "S");
    assert_eq!(app.model.calls().len(), 3);
}

#[tokio::test]
async fn test_upload_over_configured_limit_is_rejected() {
    let app = TestApp::with_config(RecordingModel::replying(&[]), |config| {
        config.max_upload_bytes = 64 * 1024;
    });
    let token = app.signup_and_login("ada").await;

    let upload = vec![0xAB_u8; 256 * 1024];
    let (status, _) = app
        .send(chat_request_with_image(&token, &[("message", "hi")], Some(&upload)))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn test_sessions_are_private() {
    let app = TestApp::new(RecordingModel::replying(&[]));
    let ada = app.signup_and_login("ada").await;
    let grace = app.signup_and_login("grace").await;

    let (_, session) = app
        .send(json_request("POST", "/api/chat/sessions", Some(&ada), json!({})))
        .await;
    assert_eq!(session["title"], "New Chat");
    let uri = format!("/chat/sessions/{}", session["id"].as_str().unwrap());

    let (_, body) = app.send(authed("DELETE", &uri, &grace)).await;
    assert_eq!(body["status"], "failed");

    let (status, _) = app
        .send(chat_request(
            &grace,
            &[("message", "hi"), ("session_id", session["id"].as_str().unwrap())],
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.send(authed("DELETE", &uri, &ada)).await;
    assert_eq!(body["status"], "success");
}

// ============================================================================
// Subjects and explanation cache
// ============================================================================

#[tokio::test]
async fn test_subject_catalog_routes() {
    let app = TestApp::new(RecordingModel::replying(&[]));

    let (status, body) = app
        .send(Request::get("/api/subjects/categories").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Mathematics", "Science"]));

    let (_, body) = app
        .send(
            Request::get("/api/subjects/subcategories/Mathematics")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(body, json!(["Algebra", "Arithmetic"]));

    let (status, body) = app
        .send(
            Request::get("/api/subjects/subcategories/Art")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No subcategories found for category: Art");
}

#[tokio::test]
async fn test_explanation_cache_routes() {
    let app = TestApp::new(RecordingModel::replying(&[]));

    let (_, body) = app
        .send(Request::get("/api/cache/explanation/Algebra").body(Body::empty()).unwrap())
        .await;
    assert_eq!(body, json!({"explanation": null}));

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/cache/explanation/Algebra",
            None,
            json!({"explanation": "Letters stand for numbers."}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (_, body) = app
        .send(Request::get("/api/cache/explanation/Algebra").body(Body::empty()).unwrap())
        .await;
    assert_eq!(body["explanation"], "Letters stand for numbers.");

    let on_disk = std::fs::read_to_string(app.state.explanation_cache.path()).unwrap();
    assert!(on_disk.contains("Letters stand for numbers."));
}
