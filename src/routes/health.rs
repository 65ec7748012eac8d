use crate::{error::AppError, health::HealthResponse, server::Server};
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct HealthCheckQuery {
    /// `all` runs every registered check; a component name runs just that
    /// one; omitted reports basic liveness only
    #[serde(default)]
    pub check: Option<String>,
}

/// Create health check routes
pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/", get(health_check))
}

/// Aggregated component health
#[utoipa::path(
    get,
    path = "/health",
    summary = "Health check",
    params(HealthCheckQuery),
    responses(
        (status = 200, description = "Health report", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(
    State(server): State<Server>,
    Query(params): Query<HealthCheckQuery>,
) -> Result<Json<HealthResponse>, AppError> {
    let filter = params.check.as_deref();
    let health_response = server.health_service.check_health(filter).await;

    Ok(Json(health_response))
}
