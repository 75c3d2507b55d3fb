use actix_web::{http::StatusCode, test};
use serde_json::json;

mod common;
use common::TestApp;

#[actix_web::test]
async fn test_login_success() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "username": "admin",
            "password": "admin"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["expires_in"], 24 * 3600);
}

#[actix_web::test]
async fn test_login_invalid_credentials() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for (username, password) in [("admin", "wrong_password"), ("root", "admin")] {
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({
                "username": username,
                "password": password
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("Invalid"));
    }
}

#[actix_web::test]
async fn test_login_missing_username() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "password": "admin"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_protected_endpoint_without_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/clients")
        .set_json(json!({
            "first_name": "Dana",
            "last_name": "Reyes"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_protected_endpoint_with_invalid_token() {
    let test_app = TestApp::new().await;
    let (status, body) = test_app.get("invalid_token", "/api/providers").await;
    assert_eq!(status, 401);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_change_password_flow() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;

    // Too short
    let (status, _) = test_app
        .post(
            &token,
            "/api/change-password",
            json!({
                "current_password": "admin",
                "new_password": "short",
                "confirm_password": "short"
            }),
        )
        .await;
    assert_eq!(status, 400);

    // Mismatched confirmation
    let (status, _) = test_app
        .post(
            &token,
            "/api/change-password",
            json!({
                "current_password": "admin",
                "new_password": "a-long-password",
                "confirm_password": "another-password"
            }),
        )
        .await;
    assert_eq!(status, 400);

    // Wrong current password
    let (status, _) = test_app
        .post(
            &token,
            "/api/change-password",
            json!({
                "current_password": "nope",
                "new_password": "a-long-password",
                "confirm_password": "a-long-password"
            }),
        )
        .await;
    assert_eq!(status, 401);

    let (status, body) = test_app
        .post(
            &token,
            "/api/change-password",
            json!({
                "current_password": "admin",
                "new_password": "a-long-password",
                "confirm_password": "a-long-password"
            }),
        )
        .await;
    assert_eq!(status, 200, "{body}");

    let (status, _) = test_app
        .post("", "/api/login", json!({ "username": "admin", "password": "admin" }))
        .await;
    assert_eq!(status, 401);

    let (status, body) = test_app
        .post("", "/api/login", json!({ "username": "admin", "password": "a-long-password" }))
        .await;
    assert_eq!(status, 200);
    assert!(body["token"].is_string());
}

#[actix_web::test]
async fn test_logout_is_stateless() {
    let test_app = TestApp::new().await;
    let (status, body) = test_app.post("", "/api/logout", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}
