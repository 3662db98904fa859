//! Location registry endpoints.
//!
//! - GET    /api/v1/locations
//! - POST   /api/v1/locations
//! - DELETE /api/v1/locations/:id

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AppState;
use crate::db::models::Location;
use crate::errors::{AppError, ErrorResponse};

/// A tracked location.
#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResponse {
    /// Derived identifier: `<latitude>_<longitude>`
    pub id: String,
    /// Display name (may be empty)
    pub name: String,
    /// Latitude exactly as supplied on creation
    pub latitude: String,
    /// Longitude exactly as supplied on creation
    pub longitude: String,
}

impl From<Location> for LocationResponse {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            latitude: l.latitude,
            longitude: l.longitude,
        }
    }
}

/// Body for POST /api/v1/locations.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddLocationRequest {
    /// Optional display name
    pub name: Option<String>,
    /// Decimal latitude, e.g. "52.5200". Kept verbatim; "52.52" is a different location.
    pub latitude: String,
    /// Decimal longitude, e.g. "13.4050"
    pub longitude: String,
}

impl AddLocationRequest {
    /// Check that both coordinates are numbers in range. The strings
    /// themselves are not rewritten.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_coordinate("latitude", &self.latitude, 90.0)?;
        validate_coordinate("longitude", &self.longitude, 180.0)
    }
}

fn validate_coordinate(field: &str, raw: &str, limit: f64) -> Result<(), AppError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{} must be a decimal number, got '{}'", field, raw)))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(AppError::BadRequest(format!(
            "{} must be between -{} and {}, got '{}'",
            field, limit, limit, raw
        )));
    }
    Ok(())
}

/// List all tracked locations, ordered by ID.
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    tag = "Locations",
    responses(
        (status = 200, description = "All tracked locations", body = Vec<LocationResponse>),
        (status = 500, description = "Store unreadable or a stored record could not be decoded", body = ErrorResponse),
    )
)]
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    let locations = state.weather.list_locations().await?;
    Ok(Json(
        locations.into_iter().map(LocationResponse::from).collect(),
    ))
}

/// Add a location. Its ID is derived from the coordinates.
#[utoipa::path(
    post,
    path = "/api/v1/locations",
    tag = "Locations",
    request_body = AddLocationRequest,
    responses(
        (status = 201, description = "Location created", body = LocationResponse),
        (status = 400, description = "Invalid coordinates", body = ErrorResponse),
        (status = 409, description = "A location with these coordinates already exists", body = ErrorResponse),
    )
)]
pub async fn add_location(
    State(state): State<AppState>,
    Json(request): Json<AddLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>), AppError> {
    request.validate()?;

    let name = request.name.unwrap_or_default();
    let location = state
        .weather
        .add_location(&name, &request.latitude, &request.longitude)
        .await?;

    Ok((StatusCode::CREATED, Json(location.into())))
}

/// Delete a location by ID.
#[utoipa::path(
    delete,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    params(
        ("id" = String, Path, description = "Location ID, e.g. 52.5200_13.4050"),
    ),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 404, description = "Location not found", body = ErrorResponse),
    )
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.weather.remove_location(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
