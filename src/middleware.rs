use axum::{
    body::Body,
    extract::Request,
    http::{Extensions, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

#[derive(Clone, Copy, Debug)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self(Uuid::nil())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Middleware that tags every request with a unique ID. An inbound
/// `X-Request-ID` header (e.g. from a load balancer) is honored; otherwise
/// a fresh UUID v4 is generated. The ID is stored in request extensions
/// for handlers and logging, and echoed back in the response headers.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = if let Some(existing_id) = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::from_str(s).ok())
    {
        RequestId(existing_id)
    } else {
        RequestId::new()
    };

    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), header_value);
    }

    response
}

/// Extension trait to easily extract the request ID from extensions.
pub trait RequestIdExt {
    fn request_id(&self) -> RequestId;
}

impl RequestIdExt for Extensions {
    fn request_id(&self) -> RequestId {
        self.get::<RequestId>().copied().unwrap_or_default()
    }
}

/// Request/response logging middleware for API routes.
pub async fn request_response_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let request_id = req.extensions().request_id().as_str();

    // Static assets and docs are not worth logging.
    let is_api_route = path.starts_with("/api") || path.starts_with("/health");

    if is_api_route {
        info!(
            method = %method,
            path = %path,
            request_id = %request_id,
            "API request"
        );

        let start = std::time::Instant::now();
        let response = next.run(req).await;
        let duration = start.elapsed();

        info!(
            method = %method,
            path = %path,
            status = %response.status().as_u16(),
            latency_ms = %duration.as_millis(),
            request_id = %request_id,
            "API response"
        );

        response
    } else {
        next.run(req).await
    }
}
