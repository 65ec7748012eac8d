pub mod docs;
pub mod health;
pub mod property_spaces;

pub use docs::create_docs_routes;
pub use health::create_health_routes;
pub use property_spaces::create_property_space_routes;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error payload returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Short error category
    pub error: String,
    /// Human-readable message
    pub message: String,
}
