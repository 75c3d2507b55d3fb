use serde_json::json;

mod common;
use common::{TestApp, MONDAY};

#[actix_web::test]
async fn test_booking_defaults_end_to_service_duration() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (status, body) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T10:00:42"))
        .await;
    assert_eq!(status, 201, "{body}");
    assert_eq!(body["success"], true);

    let appointment = &body["appointment"];
    assert_eq!(appointment["start_at"], "2026-10-19T10:00:00");
    assert_eq!(appointment["end_at"], "2026-10-19T10:30:00");
    assert_eq!(appointment["status"], "scheduled");
}

#[actix_web::test]
async fn test_overlapping_booking_is_rejected_with_reason() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (status, _) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T10:00:00"))
        .await;
    assert_eq!(status, 201);

    let (status, body) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T10:15:00"))
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["success"], false);
    assert_eq!(body["bookable"], false);
    assert_eq!(body["reason"], "conflict");

    let (status, body) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T16:45:00"))
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["reason"], "outside_hours");

    // Adjacent is fine
    let (status, _) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T10:30:00"))
        .await;
    assert_eq!(status, 201);
}

#[actix_web::test]
async fn test_database_trigger_blocks_double_booking() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (status, _) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T11:00:00"))
        .await;
    assert_eq!(status, 201);

    // Bypass the application check entirely
    let result = sqlx::query(
        "INSERT INTO appointments (client_id, provider_id, service_id, start_at, end_at, status, created_at, updated_at)
         VALUES (?, ?, ?, '2026-10-19 11:15:00', '2026-10-19 11:45:00', 'scheduled', '2026-10-17 09:00:00', '2026-10-17 09:00:00')",
    )
    .bind(client_id)
    .bind(provider_id)
    .bind(service_id)
    .execute(&test_app.pool)
    .await;

    let err = result.expect_err("overlapping insert must fail");
    assert!(err.to_string().contains("appointment_conflict"));
}

#[actix_web::test]
async fn test_cancelled_appointment_frees_the_slot() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (_, body) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T14:00:00"))
        .await;
    let id = body["appointment"]["id"].as_i64().unwrap();

    let (status, body) = test_app
        .post(&token, &format!("/api/appointments/{}/status", id), json!({ "status": "cancelled" }))
        .await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["appointment"]["status"], "cancelled");

    let (status, _) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T14:00:00"))
        .await;
    assert_eq!(status, 201);
}

#[actix_web::test]
async fn test_status_transitions_follow_lifecycle() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (_, body) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T09:00:00"))
        .await;
    let id = body["appointment"]["id"].as_i64().unwrap();
    let uri = format!("/api/appointments/{}/status", id);

    let (status, _) = test_app.post(&token, &uri, json!({ "status": "completed" })).await;
    assert_eq!(status, 409);

    let (status, _) = test_app.post(&token, &uri, json!({ "status": "confirmed" })).await;
    assert_eq!(status, 200);
    let (status, body) = test_app.post(&token, &uri, json!({ "status": "completed" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["appointment"]["status"], "completed");

    let (status, _) = test_app.post(&token, &uri, json!({ "status": "cancelled" })).await;
    assert_eq!(status, 409);

    let (status, _) = test_app.post(&token, &uri, json!({ "status": "rescheduled" })).await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_reschedule_excludes_itself_and_checks_others() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (_, body) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T10:00:00"))
        .await;
    let first = body["appointment"]["id"].as_i64().unwrap();
    let (_, _) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T11:00:00"))
        .await;

    // Shift by 15 minutes, overlapping only its own old range
    let (status, body) = test_app
        .patch(
            &token,
            &format!("/api/appointments/{}", first),
            json!({ "start_at": format!("{MONDAY}T10:15:00"), "notes": "Running late" }),
        )
        .await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["appointment"]["end_at"], "2026-10-19T10:45:00");
    assert_eq!(body["appointment"]["notes"], "Running late");

    let (status, body) = test_app
        .patch(
            &token,
            &format!("/api/appointments/{}", first),
            json!({ "start_at": format!("{MONDAY}T10:45:00") }),
        )
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["reason"], "conflict");
}

#[actix_web::test]
async fn test_archived_client_cannot_book() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (status, _) = test_app.delete(&token, &format!("/api/clients/{}", client_id)).await;
    assert_eq!(status, 200);

    let (status, _) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T10:00:00"))
        .await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_list_filters_and_dashboard() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;
    let second_provider = test_app.add_test_provider(&token, "Sam Ortiz").await;

    test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T09:00:00"))
        .await;
    test_app
        .book(&token, second_provider, client_id, service_id, &format!("{MONDAY}T09:00:00"))
        .await;
    test_app
        .book(&token, provider_id, client_id, service_id, "2026-10-20T09:00:00")
        .await;

    let (status, body) = test_app
        .get(&token, &format!("/api/appointments?date={}&provider_id={}", MONDAY, provider_id))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["appointments"].as_array().unwrap().len(), 1);

    let (_, body) = test_app.get(&token, "/api/appointments?status=scheduled").await;
    assert_eq!(body["appointments"].as_array().unwrap().len(), 3);

    let (status, body) = test_app.get(&token, &format!("/api/dashboard?date={}", MONDAY)).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["date"], MONDAY);
    assert_eq!(body["counts"]["scheduled"], 2);
    assert_eq!(body["counts"]["cancelled"], 0);
    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 2);
    assert!(providers
        .iter()
        .all(|p| p["appointments"].as_array().unwrap().len() == 1));

    let (_, body) = test_app
        .get(&token, &format!("/api/clients/{}/appointments", client_id))
        .await;
    assert_eq!(body["appointments"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_end_of_calendar_dates_are_rejected() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    // Start plus the 30-minute service runs past the last representable instant
    let (status, body) = test_app
        .book(&token, provider_id, client_id, service_id, "+262142-12-31T23:50:00")
        .await;
    assert_eq!(status, 400, "{body}");

    let (status, _) = test_app.get(&token, "/api/appointments?date=%2B262142-12-31").await;
    assert_eq!(status, 400);

    let (status, _) = test_app.get(&token, "/api/dashboard?date=%2B262142-12-31").await;
    assert_eq!(status, 400);
}
