use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Property Registry API",
        version = "1.0.0",
        description = "Bearer-token-authenticated CRUD API over property-management records with per-property consumption reporting"
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::property_spaces::create_property_space,
        crate::routes::property_spaces::get_property_space_by_id,
        crate::routes::property_spaces::list_property_spaces,
        crate::routes::property_spaces::update_property_space,
        crate::routes::property_spaces::delete_property_space,
        crate::routes::property_spaces::simulate_service_unavailable,
    ),
    components(schemas(
        crate::routes::ApiErrorResponse,
        crate::routes::property_spaces::AddressPayload,
        crate::routes::property_spaces::AddressPatchPayload,
        crate::routes::property_spaces::CreatePropertySpaceRequest,
        crate::routes::property_spaces::CreatePropertySpaceResponse,
        crate::routes::property_spaces::UpdatePropertySpaceRequest,
        crate::routes::property_spaces::MutationResponse,
        crate::summary::PropertySpaceSummary,
        crate::summary::AddressSummary,
        crate::health::HealthResponse,
        crate::health::HealthStatus,
        crate::health::HealthCheckResult,
        crate::health::HealthSummary,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Property Spaces", description = "Property space CRUD and consumption reports"),
        (name = "Health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Create swagger-ui routes serving the generated OpenAPI document
pub fn create_docs_routes() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
