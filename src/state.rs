use actix_web::web;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::JwtManager;
use crate::config::AppConfig;
use crate::content::SiteInfo;
use crate::repositories::{
    SqliteAppointmentRepository, SqliteClientRepository, SqliteConsentRepository, SqliteMembershipRepository,
    SqliteMessageEventRepository, SqlitePaymentRepository, SqliteProviderRepository, SqliteServiceRepository,
    SqliteSettingsRepository,
};
use crate::services::{
    AppointmentService, AvailabilityService, CatalogService, ClientService, ConsentService, MembershipService,
    PaymentService, ProviderService, SettingsService, WebhookService,
};

/// Everything the handlers pull out of `web::Data`, built once per process.
#[derive(Clone)]
pub struct AppState {
    pub pool: web::Data<SqlitePool>,
    pub jwt_manager: web::Data<JwtManager>,
    pub site: web::Data<SiteInfo>,
    pub settings_service: web::Data<SettingsService>,
    pub client_service: web::Data<ClientService>,
    pub provider_service: web::Data<ProviderService>,
    pub catalog_service: web::Data<CatalogService>,
    pub availability_service: web::Data<AvailabilityService>,
    pub appointment_service: web::Data<AppointmentService>,
    pub payment_service: web::Data<PaymentService>,
    pub consent_service: web::Data<ConsentService>,
    pub membership_service: web::Data<MembershipService>,
    pub webhook_service: web::Data<WebhookService>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        // Initialize repositories
        let settings_repository = Arc::new(SqliteSettingsRepository::new(pool.clone()));
        let client_repository = Arc::new(SqliteClientRepository::new(pool.clone()));
        let provider_repository = Arc::new(SqliteProviderRepository::new(pool.clone()));
        let service_repository = Arc::new(SqliteServiceRepository::new(pool.clone()));
        let appointment_repository = Arc::new(SqliteAppointmentRepository::new(pool.clone()));
        let payment_repository = Arc::new(SqlitePaymentRepository::new(pool.clone()));
        let consent_repository = Arc::new(SqliteConsentRepository::new(pool.clone()));
        let membership_repository = Arc::new(SqliteMembershipRepository::new(pool.clone()));
        let message_repository = Arc::new(SqliteMessageEventRepository::new(pool.clone()));

        // Initialize services with dependency injection
        let availability_service = Arc::new(AvailabilityService::new(
            provider_repository.clone(),
            appointment_repository.clone(),
            service_repository.clone(),
            config.slot_step_minutes,
        ));
        let appointment_service = AppointmentService::new(
            appointment_repository.clone(),
            client_repository.clone(),
            provider_repository.clone(),
            service_repository.clone(),
            availability_service.clone(),
        );
        let payment_service = Arc::new(PaymentService::new(
            payment_repository,
            client_repository.clone(),
            appointment_repository.clone(),
        ));
        let webhook_service = WebhookService::new(
            payment_service.clone(),
            message_repository,
            config.payment_webhook_secret.clone(),
            config.messaging_webhook_secret.clone(),
        );

        Self {
            pool: web::Data::new(pool),
            jwt_manager: web::Data::new(JwtManager::new(&config.jwt_secret)),
            site: web::Data::new(SiteInfo::from_config(config)),
            settings_service: web::Data::new(SettingsService::new(settings_repository)),
            client_service: web::Data::new(ClientService::new(
                client_repository.clone(),
                appointment_repository,
            )),
            provider_service: web::Data::new(ProviderService::new(provider_repository)),
            catalog_service: web::Data::new(CatalogService::new(service_repository)),
            availability_service: web::Data::from(availability_service),
            appointment_service: web::Data::new(appointment_service),
            payment_service: web::Data::from(payment_service),
            consent_service: web::Data::new(ConsentService::new(consent_repository, client_repository.clone())),
            membership_service: web::Data::new(MembershipService::new(membership_repository, client_repository)),
            webhook_service: web::Data::new(webhook_service),
        }
    }

    /// Register shared data and every route on an app or scope.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.pool.clone())
            .app_data(self.jwt_manager.clone())
            .app_data(self.site.clone())
            .app_data(self.settings_service.clone())
            .app_data(self.client_service.clone())
            .app_data(self.provider_service.clone())
            .app_data(self.catalog_service.clone())
            .app_data(self.availability_service.clone())
            .app_data(self.appointment_service.clone())
            .app_data(self.payment_service.clone())
            .app_data(self.consent_service.clone())
            .app_data(self.membership_service.clone())
            .app_data(self.webhook_service.clone())
            .app_data(crate::routes::json_config())
            .app_data(crate::routes::query_config());
        crate::routes::configure_routes(cfg);
    }
}
