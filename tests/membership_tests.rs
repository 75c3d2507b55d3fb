use serde_json::json;

mod common;
use common::TestApp;

async fn create_plan(test_app: &TestApp, token: &str, name: &str) -> i64 {
    let (status, body) = test_app
        .post(
            token,
            "/api/memberships/plans",
            json!({ "name": name, "description": "Monthly facial", "monthly_price_cents": 9900 }),
        )
        .await;
    assert_eq!(status, 201, "{body}");
    body["plan"]["id"].as_i64().unwrap()
}

#[actix_web::test]
async fn test_plan_crud() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;

    let (status, _) = test_app
        .post(&token, "/api/memberships/plans", json!({ "name": "Glow", "monthly_price_cents": -1 }))
        .await;
    assert_eq!(status, 400);

    let plan_id = create_plan(&test_app, &token, "Glow Club").await;

    let (status, _) = test_app
        .post(&token, "/api/memberships/plans", json!({ "name": "Glow Club", "monthly_price_cents": 100 }))
        .await;
    assert_eq!(status, 409);

    let (status, body) = test_app
        .put(
            &token,
            &format!("/api/memberships/plans/{}", plan_id),
            json!({ "name": "Glow Club Plus", "monthly_price_cents": 12900 }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["plan"]["name"], "Glow Club Plus");
    assert_eq!(body["plan"]["monthly_price_cents"], 12900);

    let (_, body) = test_app.get(&token, "/api/memberships/plans").await;
    assert_eq!(body["plans"].as_array().unwrap().len(), 1);

    let (status, _) = test_app
        .delete(&token, &format!("/api/memberships/plans/{}", plan_id))
        .await;
    assert_eq!(status, 200);
    let (status, _) = test_app
        .get(&token, &format!("/api/memberships/plans/{}", plan_id))
        .await;
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn test_enrollment_lifecycle() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let client_id = test_app.add_test_client(&token, "dana@example.com").await;
    let plan_id = create_plan(&test_app, &token, "Glow Club").await;

    let (status, body) = test_app
        .post(&token, "/api/memberships", json!({ "client_id": client_id, "plan_id": plan_id }))
        .await;
    assert_eq!(status, 201, "{body}");
    assert_eq!(body["membership"]["status"], "active");
    let membership_id = body["membership"]["id"].as_i64().unwrap();

    let (status, _) = test_app
        .post(&token, "/api/memberships", json!({ "client_id": client_id, "plan_id": plan_id }))
        .await;
    assert_eq!(status, 409);

    // Enrolled plans cannot be removed
    let (status, _) = test_app
        .delete(&token, &format!("/api/memberships/plans/{}", plan_id))
        .await;
    assert_eq!(status, 409);

    let (status, body) = test_app
        .post(&token, &format!("/api/memberships/{}/cancel", membership_id), json!({}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["membership"]["status"], "cancelled");
    assert!(body["membership"]["cancelled_at"].is_string());

    let (status, _) = test_app
        .post(&token, &format!("/api/memberships/{}/cancel", membership_id), json!({}))
        .await;
    assert_eq!(status, 409);

    // Re-joining after a cancellation is allowed
    let (status, _) = test_app
        .post(&token, "/api/memberships", json!({ "client_id": client_id, "plan_id": plan_id }))
        .await;
    assert_eq!(status, 201);

    let (status, body) = test_app
        .get(&token, &format!("/api/clients/{}/memberships", client_id))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["memberships"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_inactive_plan_rejects_enrollment() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let client_id = test_app.add_test_client(&token, "dana@example.com").await;
    let plan_id = create_plan(&test_app, &token, "Legacy").await;

    test_app
        .put(
            &token,
            &format!("/api/memberships/plans/{}", plan_id),
            json!({ "name": "Legacy", "monthly_price_cents": 9900, "is_active": false }),
        )
        .await;

    let (status, _) = test_app
        .post(&token, "/api/memberships", json!({ "client_id": client_id, "plan_id": plan_id }))
        .await;
    assert_eq!(status, 400);

    let (status, _) = test_app
        .post(&token, "/api/memberships", json!({ "client_id": 9999, "plan_id": plan_id }))
        .await;
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn test_consent_forms() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let client_id = test_app.add_test_client(&token, "dana@example.com").await;

    let (status, _) = test_app
        .post(
            &token,
            "/api/consents",
            json!({ "client_id": client_id, "form_type": "neurotoxin", "signed_name": "", "content": "I agree" }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, body) = test_app
        .post(
            &token,
            "/api/consents",
            json!({
                "client_id": client_id,
                "form_type": "neurotoxin",
                "signed_name": "Dana Reyes",
                "content": "I understand the risks of neurotoxin treatment."
            }),
        )
        .await;
    assert_eq!(status, 201, "{body}");
    let consent_id = body["consent"]["id"].as_i64().unwrap();
    assert!(body["consent"]["signed_at"].is_string());

    let (status, body) = test_app
        .get(&token, &format!("/api/clients/{}/consents", client_id))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["consents"].as_array().unwrap().len(), 1);

    let (status, body) = test_app.get(&token, &format!("/api/consents/{}", consent_id)).await;
    assert_eq!(status, 200);
    assert_eq!(body["consent"]["form_type"], "neurotoxin");

    let (status, _) = test_app.delete(&token, &format!("/api/consents/{}", consent_id)).await;
    assert_eq!(status, 200);
    let (status, _) = test_app.get(&token, &format!("/api/consents/{}", consent_id)).await;
    assert_eq!(status, 404);

    let (status, _) = test_app.get(&token, "/api/clients/9999/consents").await;
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn test_archived_client_cannot_sign() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let client_id = test_app.add_test_client(&token, "dana@example.com").await;
    test_app.delete(&token, &format!("/api/clients/{}", client_id)).await;

    let (status, _) = test_app
        .post(
            &token,
            "/api/consents",
            json!({ "client_id": client_id, "form_type": "laser", "signed_name": "Dana Reyes", "content": "ok" }),
        )
        .await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_archived_client_cannot_enroll() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let client_id = test_app.add_test_client(&token, "dana@example.com").await;
    let plan_id = create_plan(&test_app, &token, "Glow Club").await;
    test_app.delete(&token, &format!("/api/clients/{}", client_id)).await;

    let (status, body) = test_app
        .post(&token, "/api/memberships", json!({ "client_id": client_id, "plan_id": plan_id }))
        .await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("archived"));
}
