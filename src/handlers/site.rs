use actix_web::{web, HttpResponse, Result};

use crate::content::{SiteInfo, SiteResponse};
use crate::models::{CatalogResponse, ServiceError};
use crate::services::CatalogService;

#[utoipa::path(
    get,
    path = "/api/site",
    responses(
        (status = 200, description = "Site metadata and locations", body = SiteResponse)
    ),
    security()
)]
pub async fn site_info(site: web::Data<SiteInfo>) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(SiteResponse {
        success: true,
        site: site.get_ref().clone(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/catalog/services",
    responses(
        (status = 200, description = "Active services grouped by category", body = CatalogResponse)
    ),
    security()
)]
pub async fn public_catalog(catalog_service: web::Data<CatalogService>) -> Result<HttpResponse, ServiceError> {
    let categories = catalog_service.public_catalog().await?;
    Ok(HttpResponse::Ok().json(CatalogResponse {
        success: true,
        categories,
    }))
}
