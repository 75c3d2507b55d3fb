use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use tracing_subscriber::EnvFilter;

use medspa_backend::config::AppConfig;
use medspa_backend::database::{initialize_database, seed_admin};
use medspa_backend::openapi_config::api_doc;
use medspa_backend::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .init();

    let config = AppConfig::from_env()?;

    let pool = initialize_database(&config.database_url).await?;
    seed_admin(&pool, &config.admin_username, &config.admin_password).await?;

    if config.payment_webhook_secret.is_none() {
        tracing::warn!("PAYMENT_WEBHOOK_SECRET not set; payment webhooks will be rejected");
    }
    if config.messaging_webhook_secret.is_none() {
        tracing::warn!("MESSAGING_WEBHOOK_SECRET not set; messaging webhooks will be rejected");
    }

    let state = AppState::new(pool, &config);

    // Build the OpenAPI spec once, outside the worker factory
    let openapi_spec = api_doc();

    tracing::info!("{} backend listening on http://{}", config.site.name, config.bind_address);
    tracing::info!("API documentation: http://{}/swagger-ui/", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(
                utoipa_swagger_ui::SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi_spec.clone()),
            )
            .configure(|cfg| state.configure(cfg))
    })
    .bind(config.bind_address)?
    .run()
    .await?;

    Ok(())
}
