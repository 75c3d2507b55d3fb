use crate::auth::{extract_token_from_header, Claims, JwtManager};
use crate::models::ServiceError;

/// Verify the bearer token on an internal endpoint.
pub fn authenticate_request(req: &actix_web::HttpRequest, jwt_manager: &JwtManager) -> Result<Claims, ServiceError> {
    let token = extract_token_from_header(req)
        .ok_or_else(|| ServiceError::AuthenticationError("Not authenticated".to_string()))?;

    jwt_manager
        .verify_token(&token)
        .map(|data| data.claims)
        .map_err(|_| ServiceError::AuthenticationError("Invalid or expired token".to_string()))
}
