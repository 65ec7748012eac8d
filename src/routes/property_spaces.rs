use crate::{
    database::dao::{AddressPatch, NewAddress, PropertySpacePatch},
    error::AppError,
    routes::ApiErrorResponse,
    server::Server,
    summary::{PropertySpaceSummary, property_space_summary},
};
use axum::{
    Json as AxumJson, Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 128;
const ADDRESS_FIELD_MIN_CHARS: usize = 2;
const ADDRESS_FIELD_MAX_CHARS: usize = 64;

/// Address fields for creating a property space
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddressPayload {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

/// Request model for creating a property space
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePropertySpaceRequest {
    pub name: String,
    pub address: AddressPayload,
}

/// Response model for a created property space
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePropertySpaceResponse {
    pub property_space_id: i32,
}

/// Partial address update; omitted fields are left unchanged
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct AddressPatchPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Request model for partially updating a property space
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePropertySpaceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressPatchPayload>,
}

/// Response model for update and delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    pub success: bool,
}

/// Optional calendar-year filter for consumption reports
#[derive(Debug, Deserialize, IntoParams)]
pub struct YearQuery {
    /// Keep only meter readings whose interval touches this year
    #[serde(default)]
    pub year: Option<i32>,
}

fn validate_field(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let chars = value.chars().count();
    if chars < min || chars > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), AppError> {
    validate_field("name", name, NAME_MIN_CHARS, NAME_MAX_CHARS)
}

fn validate_address_field(field: &str, value: &str) -> Result<(), AppError> {
    validate_field(
        field,
        value,
        ADDRESS_FIELD_MIN_CHARS,
        ADDRESS_FIELD_MAX_CHARS,
    )
}

fn validate_address(address: &AddressPayload) -> Result<(), AppError> {
    validate_address_field("street", &address.street)?;
    validate_address_field("city", &address.city)?;
    validate_address_field("state", &address.state)?;
    validate_address_field("country", &address.country)?;
    validate_address_field("postal_code", &address.postal_code)?;
    Ok(())
}

fn validate_year(year: Option<i32>) -> Result<(), AppError> {
    if let Some(year) = year {
        if !(1..=9999).contains(&year) {
            return Err(AppError::Validation(
                "year must be between 1 and 9999".to_string(),
            ));
        }
    }
    Ok(())
}

/// Create a property space with its address
#[utoipa::path(
    post,
    path = "/api/v1/property-spaces",
    summary = "Create property space",
    request_body = CreatePropertySpaceRequest,
    responses(
        (status = 200, description = "Property space created", body = CreatePropertySpaceResponse),
        (status = 400, description = "Invalid field length", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Property Spaces",
    security(("bearer_auth" = []))
)]
pub async fn create_property_space(
    State(server): State<Server>,
    AxumJson(payload): AxumJson<CreatePropertySpaceRequest>,
) -> Result<Json<CreatePropertySpaceResponse>, AppError> {
    validate_name(&payload.name)?;
    validate_address(&payload.address)?;

    info!(name = %payload.name, "Creating property space");

    let property_space_id = server
        .database
        .property_spaces()
        .create(
            &payload.name,
            NewAddress {
                street: payload.address.street,
                city: payload.address.city,
                state: payload.address.state,
                country: payload.address.country,
                postal_code: payload.address.postal_code,
            },
        )
        .await?;

    info!(property_space_id = %property_space_id, "Property space created");

    Ok(Json(CreatePropertySpaceResponse { property_space_id }))
}

/// Get the consumption report for one property space
#[utoipa::path(
    get,
    path = "/api/v1/property-spaces/{property_space_id}",
    summary = "Get property space report",
    params(
        ("property_space_id" = i32, Path, description = "Property space ID"),
        YearQuery
    ),
    responses(
        (status = 200, description = "Report computed", body = PropertySpaceSummary),
        (status = 400, description = "Invalid year", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Property space not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Property Spaces",
    security(("bearer_auth" = []))
)]
pub async fn get_property_space_by_id(
    State(server): State<Server>,
    Path(property_space_id): Path<i32>,
    Query(query): Query<YearQuery>,
) -> Result<Json<PropertySpaceSummary>, AppError> {
    validate_year(query.year)?;

    info!(property_space_id = %property_space_id, year = ?query.year, "Getting property space");

    let relations = server
        .database
        .property_spaces()
        .load_related(property_space_id, query.year)
        .await?
        .ok_or_else(|| AppError::NotFound("Property space not found".to_string()))?;

    Ok(Json(property_space_summary(relations)))
}

/// List the consumption reports of all property spaces
#[utoipa::path(
    get,
    path = "/api/v1/property-spaces",
    summary = "List property space reports",
    params(YearQuery),
    responses(
        (status = 200, description = "Reports computed", body = [PropertySpaceSummary]),
        (status = 400, description = "Invalid year", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Property Spaces",
    security(("bearer_auth" = []))
)]
pub async fn list_property_spaces(
    State(server): State<Server>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<PropertySpaceSummary>>, AppError> {
    validate_year(query.year)?;

    info!(year = ?query.year, "Listing property spaces");

    let related = server
        .database
        .property_spaces()
        .list_related(query.year)
        .await?;

    info!(count = related.len(), "Found property spaces");

    let summaries = related.into_iter().map(property_space_summary).collect();

    Ok(Json(summaries))
}

/// Partially update a property space and/or its address
#[utoipa::path(
    put,
    path = "/api/v1/property-spaces/{property_space_id}",
    summary = "Update property space",
    params(
        ("property_space_id" = i32, Path, description = "Property space ID")
    ),
    request_body = UpdatePropertySpaceRequest,
    responses(
        (status = 200, description = "Property space updated", body = MutationResponse),
        (status = 400, description = "Invalid field length", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Property space not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Property Spaces",
    security(("bearer_auth" = []))
)]
pub async fn update_property_space(
    State(server): State<Server>,
    Path(property_space_id): Path<i32>,
    AxumJson(payload): AxumJson<UpdatePropertySpaceRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }
    if let Some(address) = &payload.address {
        if let Some(street) = &address.street {
            validate_address_field("street", street)?;
        }
        if let Some(city) = &address.city {
            validate_address_field("city", city)?;
        }
        if let Some(state) = &address.state {
            validate_address_field("state", state)?;
        }
        if let Some(country) = &address.country {
            validate_address_field("country", country)?;
        }
        if let Some(postal_code) = &address.postal_code {
            validate_address_field("postal_code", postal_code)?;
        }
    }

    info!(property_space_id = %property_space_id, "Updating property space");

    let patch = PropertySpacePatch {
        name: payload.name,
        address: payload.address.map(|address| AddressPatch {
            street: address.street,
            city: address.city,
            state: address.state,
            country: address.country,
            postal_code: address.postal_code,
        }),
    };

    server
        .database
        .property_spaces()
        .update(property_space_id, patch)
        .await
        .map_err(|e| match e {
            crate::database::DatabaseError::NotFound => {
                AppError::NotFound("Property space not found".to_string())
            }
            other => AppError::Database(other),
        })?;

    info!(property_space_id = %property_space_id, "Property space updated");

    Ok(Json(MutationResponse { success: true }))
}

/// Delete a property space, cascading to its address, units and meter
/// associations
#[utoipa::path(
    delete,
    path = "/api/v1/property-spaces/{property_space_id}",
    summary = "Delete property space",
    params(
        ("property_space_id" = i32, Path, description = "Property space ID")
    ),
    responses(
        (status = 200, description = "Property space deleted", body = MutationResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Property space not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Property Spaces",
    security(("bearer_auth" = []))
)]
pub async fn delete_property_space(
    State(server): State<Server>,
    Path(property_space_id): Path<i32>,
) -> Result<Json<MutationResponse>, AppError> {
    info!(property_space_id = %property_space_id, "Deleting property space");

    server
        .database
        .property_spaces()
        .delete(property_space_id)
        .await
        .map_err(|e| match e {
            crate::database::DatabaseError::NotFound => {
                AppError::NotFound("Property space not found".to_string())
            }
            other => AppError::Database(other),
        })?;

    info!(property_space_id = %property_space_id, "Property space deleted");

    Ok(Json(MutationResponse { success: true }))
}

/// Always fail with a 503, for exercising client retry handling
#[utoipa::path(
    get,
    path = "/api/v1/service-unavailable-exception",
    summary = "Simulate a service outage",
    responses(
        (status = 503, description = "Simulated outage", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse)
    ),
    tag = "Property Spaces",
    security(("bearer_auth" = []))
)]
pub async fn simulate_service_unavailable() -> Result<Json<MutationResponse>, AppError> {
    Err(AppError::ServiceUnavailable(
        "We are simulating a service unavailable exception.".to_string(),
    ))
}

/// Create property space routes
pub fn create_property_space_routes() -> Router<Server> {
    Router::new()
        .route(
            "/property-spaces",
            get(list_property_spaces).post(create_property_space),
        )
        .route(
            "/property-spaces/{property_space_id}",
            get(get_property_space_by_id)
                .put(update_property_space)
                .delete(delete_property_space),
        )
        .route(
            "/service-unavailable-exception",
            get(simulate_service_unavailable),
        )
}
