mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{access_token, app_without_db, send, TEST_SECRET};
use tecnologuia_api::services::token_service;
use tecnologuia_shared::types::auth::UserRole;

#[tokio::test]
async fn profile_requires_a_bearer_token() {
    let app = app_without_db();
    let (status, body) = send(&app, "GET", "/api/auth/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E0004");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = app_without_db();
    let mut token = access_token(1, UserRole::User);
    token.push('x');
    let (status, body) = send(&app, "GET", "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E1004");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = app_without_db();
    let token =
        token_service::create_access_token(1, "a@b.com", UserRole::User, TEST_SECRET, -600).unwrap();
    let (status, body) = send(&app, "GET", "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E1003");
}

#[tokio::test]
async fn reset_token_is_not_a_bearer_token() {
    let app = app_without_db();
    let token = token_service::create_reset_token(1, TEST_SECRET, 600).unwrap();
    let (status, _) = send(&app, "GET", "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_listing_is_admin_only() {
    let app = app_without_db();
    let token = access_token(2, UserRole::User);
    for uri in ["/api/auth/users", "/api/users"] {
        let (status, body) = send(&app, "GET", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["code"], "E0005");
    }
}

#[tokio::test]
async fn content_creation_is_admin_only() {
    let app = app_without_db();
    let token = access_token(2, UserRole::User);
    let (status, _) = send(
        &app,
        "POST",
        "/api/contents",
        Some(&token),
        Some(json!({ "title": "Rust", "category": "Programação" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn register_requires_all_fields() {
    let app = app_without_db();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "ana@example.com", "password": "segredo" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
    assert_eq!(body["details"]["name"], "required");
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = app_without_db();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Ana", "email": "not-an-email", "password": "segredo" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = app_without_db();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Ana", "email": "ana@example.com", "password": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E1005");
}

#[tokio::test]
async fn login_requires_credentials() {
    let app = app_without_db();
    let (status, body) =
        send(&app, "POST", "/api/auth/login", None, Some(json!({ "email": "ana@example.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn forgot_password_requires_email() {
    let app = app_without_db();
    let (status, _) = send(&app, "POST", "/api/auth/forgot-password", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reset_password_rejects_bad_tokens() {
    let app = app_without_db();
    let access = access_token(1, UserRole::User);
    let forged = token_service::create_reset_token(1, "another-secret", 600).unwrap();

    for token in ["garbage", access.as_str(), forged.as_str()] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/reset-password",
            None,
            Some(json!({ "token": token, "newPassword": "novaSenha1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "E1006");
    }
}

#[tokio::test]
async fn reset_password_requires_both_fields() {
    let app = app_without_db();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/reset-password",
        None,
        Some(json!({ "token": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["newPassword"], "required");
}

#[tokio::test]
async fn listing_comments_needs_a_numeric_area_id() {
    let app = app_without_db();
    for uri in ["/api/comments", "/api/comments?areaId=", "/api/comments?areaId=abc"] {
        let (status, _) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn creating_a_comment_requires_auth() {
    let app = app_without_db();
    let (status, _) = send(
        &app,
        "POST",
        "/api/comments",
        None,
        Some(json!({ "content": "Olá", "areaId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn comment_body_is_validated_before_touching_the_database() {
    let app = app_without_db();
    let token = access_token(3, UserRole::User);

    let cases = [
        json!({ "content": "   ", "areaId": 1 }),
        json!({ "content": "x".repeat(2001), "areaId": 1 }),
        json!({ "content": "Olá" }),
        json!({ "content": "Olá", "areaId": "abc" }),
    ];
    for body in cases {
        let (status, _) = send(&app, "POST", "/api/comments", Some(&token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn deleting_with_a_non_numeric_id_is_a_bad_request() {
    let app = app_without_db();
    let token = access_token(3, UserRole::User);
    let (status, _) = send(&app, "DELETE", "/api/comments/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_acknowledges() {
    let app = app_without_db();
    let (status, body) = send(&app, "POST", "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let token = access_token(4, UserRole::User);
    let (status, _) = send(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_json_body_gets_an_error_body() {
    let app = app_without_db();
    for uri in ["/api/auth/login", "/api/auth/register", "/api/auth/forgot-password"] {
        let (status, body) = send(&app, "POST", uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "E0002", "{uri}");
        assert!(body["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn wrongly_typed_field_is_a_validation_error() {
    let app = app_without_db();
    let (status, body) =
        send(&app, "POST", "/api/auth/login", None, Some(json!({ "email": 5, "password": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn broken_json_is_a_bad_request() {
    let app = app_without_db();
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/reset-password")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"token\":"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "E0006");
}

#[tokio::test]
async fn overlong_register_fields_are_rejected_before_the_database() {
    let app = app_without_db();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "a".repeat(300), "email": "ana@example.com", "password": "segredo" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn overlong_profile_fields_are_rejected_before_the_database() {
    let app = app_without_db();
    let token = access_token(5, UserRole::User);
    let (status, body) = send(
        &app,
        "PUT",
        "/api/auth/profile",
        Some(&token),
        Some(json!({ "phone": "9".repeat(60) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn overlong_content_title_is_rejected_before_the_database() {
    let app = app_without_db();
    let token = access_token(1, UserRole::Admin);
    let (status, body) = send(
        &app,
        "POST",
        "/api/contents",
        Some(&token),
        Some(json!({ "title": "t".repeat(256), "category": "Redes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn health_reports_unreachable_database() {
    let app = app_without_db();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"][0]["name"], "database");
    assert_eq!(body["checks"][0]["message"], "database unreachable");
    assert!(!body.to_string().contains("127.0.0.1"));
}

#[tokio::test]
async fn metrics_is_empty_without_a_recorder() {
    let app = app_without_db();
    let (status, body) = send(&app, "GET", "/metrics", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn database_failures_do_not_leak_details() {
    let app = app_without_db();
    let (status, body) = send(&app, "GET", "/api/comments/areas", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "E0001");
    assert!(!body.to_string().contains("127.0.0.1"));
}

#[tokio::test]
async fn cors_preflight_allows_the_frontend_origin() {
    let app = app_without_db();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/auth/login")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}
