//! Batched current conditions for many locations.
//!
//! All coordinates go out in one request as parallel comma-joined lists.
//! Response element `i` is attributed to input location `i`; there is no
//! matching on the coordinates the provider echoes back. If the provider ever
//! reorders its answer, conditions end up on the wrong location. A response
//! of the wrong length is rejected.

use serde::Serialize;
use utoipa::ToSchema;

use crate::db::models::Location;
use crate::errors::AppError;
use crate::services::locations::LocationStore;
use crate::services::open_meteo::{OpenMeteoClient, UnitLabels};

/// Current weather at one stored location.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentConditions {
    pub id: String,
    pub location_name: String,
    pub latitude: String,
    pub longitude: String,
    /// Air temperature at 2 m
    pub temperature: Option<f64>,
    /// Cloud cover percentage
    pub cloud_coverage: Option<f64>,
    /// Wind speed at 80 m
    pub wind_speed: Option<f64>,
    /// Wind direction at 10 m, in degrees
    pub wind_direction: Option<f64>,
    pub uv_index: Option<f64>,
    /// WMO weather interpretation code
    pub weather_code: Option<i64>,
    #[schema(value_type = Object)]
    pub units: UnitLabels,
}

#[derive(Debug, Clone)]
pub struct BatchCurrentClient {
    api: OpenMeteoClient,
    locations: LocationStore,
}

impl BatchCurrentClient {
    pub fn new(api: OpenMeteoClient, locations: LocationStore) -> Self {
        Self { api, locations }
    }

    /// Fetch current conditions for every location in one provider call.
    ///
    /// The output has the same order as `locations`. Any location missing
    /// from the store at re-resolution time fails the whole batch.
    pub async fn fetch_many(
        &self,
        locations: &[Location],
    ) -> Result<Vec<CurrentConditions>, AppError> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let latitudes: Vec<&str> = locations.iter().map(|l| l.latitude.as_str()).collect();
        let longitudes: Vec<&str> = locations.iter().map(|l| l.longitude.as_str()).collect();

        let responses = self.api.fetch_current(&latitudes, &longitudes).await?;

        if responses.len() != locations.len() {
            return Err(AppError::Parse(format!(
                "weather provider returned {} results for {} locations",
                responses.len(),
                locations.len()
            )));
        }

        let mut conditions = Vec::with_capacity(responses.len());
        for (index, data) in responses.into_iter().enumerate() {
            let requested = &locations[index];
            let stored = self
                .locations
                .resolve(&requested.latitude, &requested.longitude)
                .await?;

            conditions.push(CurrentConditions {
                id: stored.id,
                location_name: stored.name,
                latitude: stored.latitude,
                longitude: stored.longitude,
                temperature: data.current.temperature_2m,
                cloud_coverage: data.current.cloud_cover,
                wind_speed: data.current.wind_speed_80m,
                wind_direction: data.current.wind_direction_10m,
                uv_index: data.current.uv_index,
                weather_code: data.current.weather_code,
                units: data.current_units,
            });
        }

        Ok(conditions)
    }
}
