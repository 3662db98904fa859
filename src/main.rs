// GreenHeat API v0.1
use axum::http::Method;
use axum::{
    routing::{delete, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod db;
mod errors;
mod helpers;
mod routes;
mod services;

use config::AppConfig;
use db::seed::DEFAULT_LOCATIONS;
use db::store::FileStore;
use routes::AppState;
use services::aggregation::WeatherFacade;
use services::open_meteo::OpenMeteoClient;

/// GreenHeat API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GreenHeat API",
        version = "0.1.0",
        description = "Tracks named locations and serves their weather. \
            Forecasts and current conditions are fetched on demand from Open-Meteo; \
            only the location list is persisted.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Locations", description = "Location registry"),
        (name = "Forecasts", description = "Forecasts and current conditions"),
    ),
    paths(
        routes::health::health_check,
        routes::locations::list_locations,
        routes::locations::add_location,
        routes::locations::delete_location,
        routes::forecasts::get_forecast,
        routes::forecasts::get_fleet_snapshot,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::locations::LocationResponse,
            routes::locations::AddLocationRequest,
            services::forecast::ForecastSnapshot,
            services::open_meteo::DailySeries,
            services::open_meteo::HourlySeries,
            services::current::CurrentConditions,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenheat_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    let store = FileStore::open(&config.data_dir)
        .await
        .expect("Failed to open collection store");
    tracing::info!("Collection store ready at {}", config.data_dir);

    let api = OpenMeteoClient::new(&config.open_meteo_url, config.http_timeout)
        .expect("Failed to build HTTP client");

    let weather = WeatherFacade::from_parts(Arc::new(store), api);

    if config.seed_default_locations {
        weather.locations().seed(DEFAULT_LOCATIONS).await;
    }

    let app_state = AppState { weather };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/v1/health", get(routes::health::health_check))
        .route(
            "/api/v1/locations",
            get(routes::locations::list_locations).post(routes::locations::add_location),
        )
        .route(
            "/api/v1/locations/:id",
            delete(routes::locations::delete_location),
        )
        .route(
            "/api/v1/forecasts/:location_id",
            get(routes::forecasts::get_forecast),
        )
        .route(
            "/api/v1/weather/current",
            get(routes::forecasts::get_fleet_snapshot),
        )
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
