#![allow(dead_code)]

use actix_web::{test, App};
use medspa_backend::{
    config::{AppConfig, SiteSettings},
    database::seed_admin,
    services::SignatureVerifier,
    state::AppState,
};
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tempfile::TempDir;

pub const PAYMENT_SECRET: &str = "test_payment_secret";
pub const MESSAGING_SECRET: &str = "test_messaging_secret";

/// 2026-10-19 is a Monday
pub const MONDAY: &str = "2026-10-19";

pub struct TestApp {
    pub pool: SqlitePool,
    pub config: AppConfig,
    #[allow(dead_code)]
    pub temp_dir: TempDir,
}

impl TestApp {
    fn test_config() -> AppConfig {
        AppConfig {
            database_url: String::new(),
            bind_address: "127.0.0.1:0".parse().unwrap(),
            jwt_secret: "test_secret_key".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
            payment_webhook_secret: Some(PAYMENT_SECRET.to_string()),
            messaging_webhook_secret: Some(MESSAGING_SECRET.to_string()),
            slot_step_minutes: 30,
            site: SiteSettings {
                name: "Test Med Spa".to_string(),
                phone: "(555) 000-1111".to_string(),
                email: "front@test-spa.example".to_string(),
                address: "1 Test Street".to_string(),
                timezone: "America/New_York".to_string(),
            },
        }
    }

    pub async fn new() -> Self {
        Self::with_config(Self::test_config()).await
    }

    pub async fn with_config(mut config: AppConfig) -> Self {
        // Create temporary database
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .expect("Failed to create database pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        // Default admin account (admin/admin for testing)
        seed_admin(&pool, &config.admin_username, &config.admin_password)
            .await
            .expect("Failed to seed admin");

        config.database_url = database_url;

        Self {
            pool,
            config,
            temp_dir,
        }
    }

    pub fn without_webhook_secrets() -> AppConfig {
        let mut config = Self::test_config();
        config.payment_webhook_secret = None;
        config.messaging_webhook_secret = None;
        config
    }

    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = AppState::new(self.pool.clone(), &self.config);
        App::new().configure(move |cfg| state.configure(cfg))
    }

    pub async fn login_and_get_token(&self) -> String {
        let app = test::init_service(self.create_app()).await;

        let login_req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({
                "username": "admin",
                "password": "admin"
            }))
            .to_request();

        let resp = test::call_service(&app, login_req).await;
        let body: Value = test::read_body_json(resp).await;

        body["token"].as_str().unwrap().to_string()
    }

    /// POST a JSON body with the bearer token and return status plus body.
    pub async fn post(&self, token: &str, uri: &str, body: Value) -> (u16, Value) {
        let app = test::init_service(self.create_app()).await;
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    pub async fn put(&self, token: &str, uri: &str, body: Value) -> (u16, Value) {
        let app = test::init_service(self.create_app()).await;
        let req = test::TestRequest::put()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    pub async fn patch(&self, token: &str, uri: &str, body: Value) -> (u16, Value) {
        let app = test::init_service(self.create_app()).await;
        let req = test::TestRequest::patch()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    pub async fn get(&self, token: &str, uri: &str) -> (u16, Value) {
        let app = test::init_service(self.create_app()).await;
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    pub async fn delete(&self, token: &str, uri: &str) -> (u16, Value) {
        let app = test::init_service(self.create_app()).await;
        let req = test::TestRequest::delete()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    /// POST a raw webhook body, signed with `secret` when given.
    pub async fn webhook(&self, uri: &str, body: &str, secret: Option<&str>) -> (u16, Value) {
        let app = test::init_service(self.create_app()).await;
        let mut req = test::TestRequest::post()
            .uri(uri)
            .insert_header(("Content-Type", "application/json"))
            .set_payload(body.to_string());
        if let Some(secret) = secret {
            req = req.insert_header(("X-Signature", SignatureVerifier::sign(secret, body.as_bytes())));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    /// Provider working Monday to Friday, 09:00-17:00.
    pub async fn add_test_provider(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(token, "/api/providers", json!({ "name": name, "title": "Nurse Injector" }))
            .await;
        assert_eq!(status, 201, "{body}");
        let id = body["provider"]["id"].as_i64().unwrap();

        let day = json!({ "open": "09:00", "close": "17:00" });
        let (status, body) = self
            .put(
                token,
                &format!("/api/providers/{}/hours", id),
                json!({
                    "monday": day,
                    "tuesday": day,
                    "wednesday": day,
                    "thursday": day,
                    "friday": day,
                    "saturday": null,
                    "sunday": null
                }),
            )
            .await;
        assert_eq!(status, 200, "{body}");
        id
    }

    pub async fn add_test_client(&self, token: &str, email: &str) -> i64 {
        let (status, body) = self
            .post(
                token,
                "/api/clients",
                json!({
                    "first_name": "Dana",
                    "last_name": "Reyes",
                    "email": email,
                    "phone": "+1 555 010 2030"
                }),
            )
            .await;
        assert_eq!(status, 201, "{body}");
        body["client"]["id"].as_i64().unwrap()
    }

    pub async fn add_test_service(&self, token: &str, name: &str, duration_minutes: i64) -> i64 {
        let (status, body) = self
            .post(
                token,
                "/api/services",
                json!({
                    "name": name,
                    "category": "Injectables",
                    "duration_minutes": duration_minutes,
                    "price_cents": 35000
                }),
            )
            .await;
        assert_eq!(status, 201, "{body}");
        body["service"]["id"].as_i64().unwrap()
    }

    /// Provider, client and 30-minute service ready for booking.
    pub async fn seed_booking_fixtures(&self, token: &str) -> (i64, i64, i64) {
        let provider_id = self.add_test_provider(token, "Alex Kim").await;
        let client_id = self.add_test_client(token, "dana@example.com").await;
        let service_id = self.add_test_service(token, "Botox", 30).await;
        (provider_id, client_id, service_id)
    }

    pub async fn book(
        &self,
        token: &str,
        provider_id: i64,
        client_id: i64,
        service_id: i64,
        start_at: &str,
    ) -> (u16, Value) {
        self.post(
            token,
            "/api/appointments",
            json!({
                "client_id": client_id,
                "provider_id": provider_id,
                "service_id": service_id,
                "start_at": start_at
            }),
        )
        .await
    }
}
