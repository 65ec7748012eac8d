use crate::error::AppError;
use crate::middleware::RequestIdExt;
use crate::server::Server;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{trace, warn};

/// Bearer-token authentication middleware. The expected token is carried
/// in server state and compared per request; there is no process-global
/// credential.
pub async fn auth_middleware(
    State(server): State<Server>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let request_id = request.extensions().request_id().as_str();

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authentication credentials".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization format".to_string()))?;

    let expected = server.config.auth.token.as_str();
    if expected.is_empty() {
        warn!(request_id = %request_id, "Rejecting request: no authentication token configured");
        return Err(AppError::Unauthorized(
            "Authentication token not configured".to_string(),
        ));
    }

    if token != expected {
        warn!(request_id = %request_id, "Rejecting request: invalid authentication token");
        return Err(AppError::Unauthorized(
            "Invalid authentication token".to_string(),
        ));
    }

    trace!(request_id = %request_id, "Bearer authentication successful");
    Ok(next.run(request).await)
}
