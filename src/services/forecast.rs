//! Single-location forecast retrieval.
//!
//! The forecast values come from the provider, keyed by the coordinates the
//! caller passed in. The display fields (name, coordinates) come from the
//! store record re-resolved after the provider answers, so a renamed location
//! shows its current name and a location deleted mid-request is reported as
//! missing.

use serde::Serialize;
use utoipa::ToSchema;

use crate::db::models::Location;
use crate::errors::AppError;
use crate::services::locations::LocationStore;
use crate::services::open_meteo::{DailySeries, HourlySeries, OpenMeteoClient, UnitLabels};

/// Multi-day forecast for one location. Series within a block are aligned by
/// index with that block's `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ForecastSnapshot {
    pub location_name: String,
    pub latitude: String,
    pub longitude: String,
    pub daily: DailySeries,
    #[schema(value_type = Object)]
    pub daily_units: UnitLabels,
    pub hourly: HourlySeries,
    #[schema(value_type = Object)]
    pub hourly_units: UnitLabels,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    api: OpenMeteoClient,
    locations: LocationStore,
}

impl ForecastClient {
    pub fn new(api: OpenMeteoClient, locations: LocationStore) -> Self {
        Self { api, locations }
    }

    /// Fetch the 7-day forecast for `location` with the given daily metrics.
    ///
    /// A provider answer with no daily entries yields `ForecastSnapshot::default()`.
    pub async fn fetch(
        &self,
        location: &Location,
        metrics: &[String],
    ) -> Result<ForecastSnapshot, AppError> {
        let response = self
            .api
            .fetch_daily(&location.latitude, &location.longitude, metrics)
            .await?;

        let stored = self
            .locations
            .resolve(&location.latitude, &location.longitude)
            .await?;

        if response.daily.time.is_empty() {
            tracing::debug!("No forecast entries returned for location {}", stored.id);
            return Ok(ForecastSnapshot::default());
        }

        Ok(ForecastSnapshot {
            location_name: stored.name,
            latitude: stored.latitude,
            longitude: stored.longitude,
            daily: response.daily,
            daily_units: response.daily_units,
            hourly: response.hourly,
            hourly_units: response.hourly_units,
        })
    }
}
