use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::auth::{JwtManager, TOKEN_LIFETIME_HOURS};
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, LoginForm, LoginResponse, PasswordChangeForm, ServiceError};
use crate::services::SettingsService;

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Login successful - JWT token returned in response body", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    security()
)]
pub async fn login_api(
    settings_service: web::Data<SettingsService>,
    form: web::Json<LoginForm>,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    if !settings_service.verify_admin(&form.username, &form.password).await? {
        tracing::warn!("Failed login attempt for '{}'", form.username);
        return Err(ServiceError::AuthenticationError("Invalid credentials".to_string()));
    }

    let token = jwt_manager
        .generate_token(&form.username)
        .map_err(|e| ServiceError::InternalError(format!("Failed to generate token: {}", e)))?;

    tracing::info!("Admin '{}' logged in", form.username);
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        expires_in: (TOKEN_LIFETIME_HOURS * 3600) as u64,
    }))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logout successful", body = ApiResponse)
    ),
    security()
)]
pub async fn logout_api() -> Result<HttpResponse, ServiceError> {
    // Tokens are stateless; the client discards its copy
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: "Logout successful - discard your token".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/change-password",
    request_body = PasswordChangeForm,
    responses(
        (status = 200, description = "Password changed successfully", body = ApiResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse)
    )
)]
pub async fn change_password_api(
    settings_service: web::Data<SettingsService>,
    form: web::Json<PasswordChangeForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    settings_service
        .change_admin_password(&form.current_password, &form.new_password, &form.confirm_password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: "Password updated successfully".to_string(),
    }))
}
