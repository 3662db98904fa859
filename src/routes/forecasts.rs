//! Weather endpoints.
//!
//! - GET /api/v1/forecasts/:location_id?daily=metric,metric
//! - GET /api/v1/weather/current

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::helpers::split_csv;
use crate::services::current::CurrentConditions;
use crate::services::forecast::ForecastSnapshot;
use crate::services::open_meteo::DEFAULT_DAILY_METRICS;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ForecastQuery {
    /// Comma-separated daily metrics (default "temperature_2m_max,temperature_2m_min")
    pub daily: Option<String>,
}

impl ForecastQuery {
    /// Requested daily metrics, falling back to the defaults when none are named.
    pub fn metrics(&self) -> Vec<String> {
        let requested = self.daily.as_deref().map(split_csv).unwrap_or_default();
        if requested.is_empty() {
            DEFAULT_DAILY_METRICS.iter().map(|m| m.to_string()).collect()
        } else {
            requested
        }
    }
}

/// Get the 7-day forecast for one stored location.
#[utoipa::path(
    get,
    path = "/api/v1/forecasts/{location_id}",
    tag = "Forecasts",
    params(
        ("location_id" = String, Path, description = "Location ID, e.g. 52.5200_13.4050"),
        ForecastQuery,
    ),
    responses(
        (status = 200, description = "Forecast for the location", body = ForecastSnapshot),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 500, description = "Location store unreadable", body = ErrorResponse),
        (status = 502, description = "Weather provider unreachable or returned malformed data", body = ErrorResponse),
    )
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<ForecastSnapshot>, AppError> {
    let snapshot = state
        .weather
        .single_forecast(&location_id, &params.metrics())
        .await?;
    Ok(Json(snapshot))
}

/// Get current conditions for every stored location in one batch.
#[utoipa::path(
    get,
    path = "/api/v1/weather/current",
    tag = "Forecasts",
    responses(
        (status = 200, description = "Current conditions, one entry per location", body = Vec<CurrentConditions>),
        (status = 404, description = "A location disappeared while the batch was in flight", body = ErrorResponse),
        (status = 500, description = "Location store unreadable", body = ErrorResponse),
        (status = 502, description = "Weather provider unreachable or returned malformed data", body = ErrorResponse),
    )
)]
pub async fn get_fleet_snapshot(
    State(state): State<AppState>,
) -> Result<Json<Vec<CurrentConditions>>, AppError> {
    let conditions = state.weather.fleet_snapshot().await?;
    Ok(Json(conditions))
}
