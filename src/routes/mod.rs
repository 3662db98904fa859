pub mod forecasts;
pub mod health;
pub mod locations;

use crate::services::aggregation::WeatherFacade;

/// Shared application state for all endpoints.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) weather: WeatherFacade,
}
