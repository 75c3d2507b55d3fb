use serde_json::json;

mod common;
use common::{TestApp, MONDAY};

#[actix_web::test]
async fn test_check_matches_reference_schedule() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (status, body) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T10:00:00"))
        .await;
    assert_eq!(status, 201, "{body}");

    let cases = [
        ("10:30", "11:00", true, None),
        ("10:15", "10:45", false, Some("conflict")),
        ("17:00", "17:30", false, Some("outside_hours")),
        ("09:30", "10:00", true, None),
    ];
    for (start, end, bookable, reason) in cases {
        let (status, body) = test_app
            .post(
                "",
                "/api/availability/check",
                json!({
                    "provider_id": provider_id,
                    "start_at": format!("{MONDAY}T{start}:00"),
                    "end_at": format!("{MONDAY}T{end}:00")
                }),
            )
            .await;
        assert_eq!(status, 200, "{start}-{end}: {body}");
        assert_eq!(body["success"], true);
        assert_eq!(body["bookable"], bookable, "{start}-{end}");
        match reason {
            Some(reason) => assert_eq!(body["reason"], reason),
            None => assert!(body["reason"].is_null()),
        }
    }
}

#[actix_web::test]
async fn test_check_closed_day_and_validation() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let provider_id = test_app.add_test_provider(&token, "Alex Kim").await;

    // Saturday
    let (status, body) = test_app
        .post(
            "",
            "/api/availability/check",
            json!({
                "provider_id": provider_id,
                "start_at": "2026-10-24T10:00:00",
                "end_at": "2026-10-24T10:30:00"
            }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["reason"], "outside_hours");

    let (status, _) = test_app
        .post(
            "",
            "/api/availability/check",
            json!({
                "provider_id": provider_id,
                "start_at": format!("{MONDAY}T11:00:00"),
                "end_at": format!("{MONDAY}T10:00:00")
            }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = test_app
        .post(
            "",
            "/api/availability/check",
            json!({
                "provider_id": 9999,
                "start_at": format!("{MONDAY}T10:00:00"),
                "end_at": format!("{MONDAY}T10:30:00")
            }),
        )
        .await;
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn test_free_slots_skip_booked_time() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let (provider_id, client_id, service_id) = test_app.seed_booking_fixtures(&token).await;

    let (status, _) = test_app
        .book(&token, provider_id, client_id, service_id, &format!("{MONDAY}T10:00:00"))
        .await;
    assert_eq!(status, 201);

    let (status, body) = test_app
        .get(
            "",
            &format!(
                "/api/availability/slots?provider_id={}&date={}&service_id={}",
                provider_id, MONDAY, service_id
            ),
        )
        .await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["duration_minutes"], 30);

    let starts: Vec<&str> = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["start_at"].as_str().unwrap())
        .collect();
    // 30-minute step from 09:00 to 16:30, minus the booked 10:00
    assert_eq!(starts.len(), 15);
    assert_eq!(starts.first(), Some(&"2026-10-19T09:00:00"));
    assert_eq!(starts.last(), Some(&"2026-10-19T16:30:00"));
    assert!(!starts.contains(&"2026-10-19T10:00:00"));
    assert!(starts.contains(&"2026-10-19T10:30:00"));
}

#[actix_web::test]
async fn test_free_slots_need_a_length() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let provider_id = test_app.add_test_provider(&token, "Alex Kim").await;

    let (status, _) = test_app
        .get("", &format!("/api/availability/slots?provider_id={}&date={}", provider_id, MONDAY))
        .await;
    assert_eq!(status, 400);

    let (status, body) = test_app
        .get(
            "",
            &format!(
                "/api/availability/slots?provider_id={}&date={}&duration_minutes=240",
                provider_id, MONDAY
            ),
        )
        .await;
    assert_eq!(status, 200);
    // 09:00, 09:30, ... 13:00
    assert_eq!(body["slots"].as_array().unwrap().len(), 9);

    let (status, body) = test_app
        .get(
            "",
            &format!("/api/availability/slots?provider_id={}&date=2026-10-25&duration_minutes=30", provider_id),
        )
        .await;
    assert_eq!(status, 200);
    assert!(body["slots"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_last_day_of_the_calendar_is_rejected() {
    let test_app = TestApp::new().await;
    let token = test_app.login_and_get_token().await;
    let provider_id = test_app.add_test_provider(&token, "Alex Kim").await;

    let (status, body) = test_app
        .get(
            "",
            &format!(
                "/api/availability/slots?provider_id={}&date=%2B262142-12-31&duration_minutes=30",
                provider_id
            ),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Date out of range");
}
