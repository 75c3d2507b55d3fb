use serde_json::json;

mod common;
use common::TestApp;

#[actix_web::test]
async fn test_client_validation() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;

    let invalid = [
        json!({ "first_name": "", "last_name": "Reyes" }),
        json!({ "first_name": "Dana", "last_name": "Reyes", "email": "not-an-email" }),
        json!({ "first_name": "Dana", "last_name": "Reyes", "phone": "call me" }),
    ];
    for body in invalid {
        let (status, response) = test_app.post(&token, "/api/clients", body).await;
        assert_eq!(status, 400, "{response}");
    }
}

#[actix_web::test]
async fn test_duplicate_email_conflicts() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;

    test_app.add_test_client(&token, "dana@example.com").await;
    let (status, body) = test_app
        .post(
            &token,
            "/api/clients",
            json!({ "first_name": "Other", "last_name": "Person", "email": "DANA@example.com" }),
        )
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_search_update_and_archive() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;

    let dana = test_app.add_test_client(&token, "dana@example.com").await;
    let (_, body) = test_app
        .post(
            &token,
            "/api/clients",
            json!({ "first_name": "Morgan", "last_name": "Chu", "email": "morgan@example.com" }),
        )
        .await;
    let morgan = body["client"]["id"].as_i64().unwrap();

    let (status, body) = test_app.get(&token, "/api/clients?q=chu").await;
    assert_eq!(status, 200);
    let found = body["clients"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], morgan);

    let (status, body) = test_app
        .put(
            &token,
            &format!("/api/clients/{}", dana),
            json!({
                "first_name": "Dana",
                "last_name": "Reyes-Park",
                "email": "dana@example.com",
                "date_of_birth": "1990-04-12"
            }),
        )
        .await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["client"]["last_name"], "Reyes-Park");
    assert_eq!(body["client"]["date_of_birth"], "1990-04-12");

    let (status, _) = test_app
        .put(
            &token,
            &format!("/api/clients/{}", dana),
            json!({ "first_name": "Dana", "last_name": "Reyes", "email": "morgan@example.com" }),
        )
        .await;
    assert_eq!(status, 409);

    let (status, _) = test_app.delete(&token, &format!("/api/clients/{}", dana)).await;
    assert_eq!(status, 200);

    let (_, body) = test_app.get(&token, "/api/clients").await;
    assert_eq!(body["clients"].as_array().unwrap().len(), 1);

    // Archived records stay readable
    let (status, body) = test_app.get(&token, &format!("/api/clients/{}", dana)).await;
    assert_eq!(status, 200);
    assert!(body["client"]["archived_at"].is_string());

    let (status, _) = test_app.get(&token, "/api/clients/9999").await;
    assert_eq!(status, 404);
}
