use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" when healthy, "degraded" when the store is unreadable)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether the location store can be listed
    pub store: bool,
}

/// Health check endpoint.
///
/// Returns the API status and version. Verifies the location store by
/// listing it; returns status "degraded" (still 200) if that fails. The
/// weather provider is not contacted.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_ok = state.weather.list_locations().await.is_ok();

    Json(HealthResponse {
        status: if store_ok {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_ok,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregation::tests::temp_facade;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_health_ok() {
        let server = MockServer::start().await;
        let (_dir, weather) = temp_facade(&server).await;

        let Json(health) = health_check(State(AppState { weather })).await;
        assert_eq!(health.status, "ok");
        assert!(health.store);
    }

    #[tokio::test]
    async fn test_health_degraded_on_corrupt_record() {
        let server = MockServer::start().await;
        let (dir, weather) = temp_facade(&server).await;
        let collection = dir.path().join("locations");
        std::fs::create_dir_all(&collection).unwrap();
        std::fs::write(collection.join("bad.json"), "[").unwrap();

        let Json(health) = health_check(State(AppState { weather })).await;
        assert_eq!(health.status, "degraded");
        assert!(!health.store);
    }
}
