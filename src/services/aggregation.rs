//! Entry points used by the HTTP layer: two reads (single forecast, fleet
//! snapshot) and two writes (add, remove), plus the plain listing.

use std::sync::Arc;

use crate::db::models::Location;
use crate::db::store::CollectionStore;
use crate::errors::AppError;
use crate::services::current::{BatchCurrentClient, CurrentConditions};
use crate::services::forecast::{ForecastClient, ForecastSnapshot};
use crate::services::locations::LocationStore;
use crate::services::open_meteo::OpenMeteoClient;

#[derive(Debug, Clone)]
pub struct WeatherFacade {
    locations: LocationStore,
    forecasts: ForecastClient,
    current: BatchCurrentClient,
}

impl WeatherFacade {
    pub fn new(
        locations: LocationStore,
        forecasts: ForecastClient,
        current: BatchCurrentClient,
    ) -> Self {
        Self {
            locations,
            forecasts,
            current,
        }
    }

    /// Wire all collaborators around one store and one provider client.
    pub fn from_parts(store: Arc<dyn CollectionStore>, api: OpenMeteoClient) -> Self {
        let locations = LocationStore::new(store);
        let forecasts = ForecastClient::new(api.clone(), locations.clone());
        let current = BatchCurrentClient::new(api, locations.clone());
        Self::new(locations, forecasts, current)
    }

    pub fn locations(&self) -> &LocationStore {
        &self.locations
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>, AppError> {
        self.locations.list().await
    }

    pub async fn single_forecast(
        &self,
        location_id: &str,
        metrics: &[String],
    ) -> Result<ForecastSnapshot, AppError> {
        let location = self.locations.get(location_id).await?;
        self.forecasts.fetch(&location, metrics).await
    }

    /// Current conditions for every stored location, in listing order.
    pub async fn fleet_snapshot(&self) -> Result<Vec<CurrentConditions>, AppError> {
        let locations = self.locations.list().await?;
        self.current.fetch_many(&locations).await
    }

    pub async fn add_location(
        &self,
        name: &str,
        latitude: &str,
        longitude: &str,
    ) -> Result<Location, AppError> {
        self.locations
            .add(Location::new(name, latitude, longitude))
            .await
    }

    pub async fn remove_location(&self, id: &str) -> Result<(), AppError> {
        self.locations.delete(id).await
    }
}
