use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde_json::json;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, EnrollmentForm, MembershipPlanForm, ServiceError};
use crate::services::MembershipService;

#[utoipa::path(
    post,
    path = "/api/memberships/plans",
    request_body = MembershipPlanForm,
    responses(
        (status = 201, description = "Plan created"),
        (status = 400, description = "Invalid name or price", body = ErrorResponse),
        (status = 409, description = "Plan name taken", body = ErrorResponse)
    )
)]
pub async fn create_plan(
    membership_service: web::Data<MembershipService>,
    form: web::Json<MembershipPlanForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let plan = membership_service.create_plan(&form).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "plan": plan
    })))
}

#[utoipa::path(
    get,
    path = "/api/memberships/plans",
    responses(
        (status = 200, description = "All plans"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_plans(
    membership_service: web::Data<MembershipService>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let plans = membership_service.list_plans().await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "plans": plans
    })))
}

#[utoipa::path(
    get,
    path = "/api/memberships/plans/{id}",
    params(("id" = i64, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan found"),
        (status = 404, description = "Plan not found", body = ErrorResponse)
    )
)]
pub async fn get_plan(
    membership_service: web::Data<MembershipService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let plan = membership_service.get_plan(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "plan": plan
    })))
}

#[utoipa::path(
    put,
    path = "/api/memberships/plans/{id}",
    params(("id" = i64, Path, description = "Plan ID")),
    request_body = MembershipPlanForm,
    responses(
        (status = 200, description = "Plan updated"),
        (status = 404, description = "Plan not found", body = ErrorResponse)
    )
)]
pub async fn update_plan(
    membership_service: web::Data<MembershipService>,
    path: web::Path<i64>,
    form: web::Json<MembershipPlanForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let plan = membership_service.update_plan(path.into_inner(), &form).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "plan": plan
    })))
}

#[utoipa::path(
    delete,
    path = "/api/memberships/plans/{id}",
    params(("id" = i64, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan deleted", body = ApiResponse),
        (status = 404, description = "Plan not found", body = ErrorResponse),
        (status = 409, description = "Plan has enrollments", body = ErrorResponse)
    )
)]
pub async fn delete_plan(
    membership_service: web::Data<MembershipService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let id = path.into_inner();
    membership_service.delete_plan(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: format!("Membership plan {} deleted", id),
    }))
}

#[utoipa::path(
    post,
    path = "/api/memberships",
    request_body = EnrollmentForm,
    responses(
        (status = 201, description = "Client enrolled"),
        (status = 404, description = "Client or plan not found", body = ErrorResponse),
        (status = 409, description = "Client already has an active membership", body = ErrorResponse)
    )
)]
pub async fn enroll_client(
    membership_service: web::Data<MembershipService>,
    form: web::Json<EnrollmentForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let membership = membership_service.enroll(form.client_id, form.plan_id).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "membership": membership
    })))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}/memberships",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Memberships of the client"),
        (status = 404, description = "Client not found", body = ErrorResponse)
    )
)]
pub async fn client_memberships(
    membership_service: web::Data<MembershipService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let memberships = membership_service.memberships_for_client(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "memberships": memberships
    })))
}

#[utoipa::path(
    post,
    path = "/api/memberships/{id}/cancel",
    params(("id" = i64, Path, description = "Membership ID")),
    responses(
        (status = 200, description = "Membership cancelled"),
        (status = 404, description = "Membership not found", body = ErrorResponse),
        (status = 409, description = "Already cancelled", body = ErrorResponse)
    )
)]
pub async fn cancel_membership(
    membership_service: web::Data<MembershipService>,
    path: web::Path<i64>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let membership = membership_service.cancel(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "membership": membership
    })))
}
