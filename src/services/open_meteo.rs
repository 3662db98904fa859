//! Open-Meteo forecast API client.
//!
//! Two request shapes are used: a single-location daily forecast, and a
//! multi-location current-conditions request carrying comma-joined latitude
//! and longitude lists. The provider answers the latter with one object per
//! submitted coordinate pair, in submission order.
//! See: https://open-meteo.com/en/docs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use utoipa::ToSchema;

use crate::errors::AppError;

/// Fixed forecast horizon in days.
pub const FORECAST_DAYS: u32 = 7;

/// Daily metrics requested when the caller does not name any.
pub const DEFAULT_DAILY_METRICS: &[&str] = &["temperature_2m_max", "temperature_2m_min"];

/// Metric set requested for the fleet current-conditions call.
pub const CURRENT_METRICS: &[&str] = &[
    "temperature_2m",
    "cloud_cover",
    "wind_speed_80m",
    "wind_direction_10m",
    "uv_index",
    "weather_code",
];

/// Metric name → unit label, e.g. `"temperature_2m" → "°C"`.
pub type UnitLabels = BTreeMap<String, String>;

/// Daily series, aligned by index with `time`. Requested metrics other than
/// the two temperatures land in `extra` under their provider name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: BTreeMap<String, Vec<serde_json::Value>>,
}

/// Hourly series, aligned by index with `time`. Independent of the daily block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub cloud_cover: Vec<Option<f64>>,
    pub wind_speed_80m: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
}

/// Instantaneous values from the `current` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentValues {
    pub temperature_2m: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub wind_speed_80m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub uv_index: Option<f64>,
    pub weather_code: Option<i64>,
}

/// One Open-Meteo response object. Blocks that were not requested decode empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenMeteoResponse {
    pub daily: DailySeries,
    pub daily_units: UnitLabels,
    pub hourly: HourlySeries,
    pub hourly_units: UnitLabels,
    pub current: CurrentValues,
    pub current_units: UnitLabels,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoErrorBody {
    reason: Option<String>,
}

/// Client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Fetch a 7-day daily forecast for one coordinate pair.
    pub async fn fetch_daily(
        &self,
        latitude: &str,
        longitude: &str,
        metrics: &[String],
    ) -> Result<OpenMeteoResponse, AppError> {
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("daily", metrics.join(",")),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("timezone", "auto".to_string()),
            ("format", "json".to_string()),
        ];

        let body = self.get_body(&query).await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("failed to parse weather data: {}", e)))
    }

    /// Fetch current conditions for many coordinate pairs in one request.
    ///
    /// `latitudes[i]` and `longitudes[i]` form pair `i`; the returned vector is
    /// in the provider's order, which is assumed to match submission order.
    pub async fn fetch_current(
        &self,
        latitudes: &[&str],
        longitudes: &[&str],
    ) -> Result<Vec<OpenMeteoResponse>, AppError> {
        let query = [
            ("latitude", latitudes.join(",")),
            ("longitude", longitudes.join(",")),
            ("current", CURRENT_METRICS.join(",")),
            ("timezone", "auto".to_string()),
            ("format", "json".to_string()),
        ];

        let body = self.get_body(&query).await?;
        parse_many(&body)
    }

    async fn get_body(&self, query: &[(&str, String)]) -> Result<String, AppError> {
        tracing::debug!("Open-Meteo request: {:?}", query);

        let response = self
            .client
            .get(&self.base_url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("failed to fetch weather data: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Fetch(format!("failed to fetch weather data: {}", e))
            } else {
                AppError::Parse(format!("failed to read response body: {}", e))
            }
        })?;

        if !status.is_success() {
            let reason = serde_json::from_str::<OpenMeteoErrorBody>(&body)
                .ok()
                .and_then(|b| b.reason)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(AppError::Fetch(format!(
                "weather provider returned HTTP {}: {}",
                status, reason
            )));
        }

        Ok(body)
    }
}

/// Parse a multi-location body. A single submitted pair comes back as a bare
/// object rather than a one-element array.
fn parse_many(body: &str) -> Result<Vec<OpenMeteoResponse>, AppError> {
    let parse_err = |e: serde_json::Error| {
        AppError::Parse(format!("failed to parse weather data: {}", e))
    };

    let value: serde_json::Value = serde_json::from_str(body).map_err(parse_err)?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value).map_err(parse_err),
        serde_json::Value::Object(_) => {
            Ok(vec![serde_json::from_value(value).map_err(parse_err)?])
        }
        other => Err(AppError::Parse(format!(
            "failed to parse weather data: expected object or array, got {}",
            other
        ))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) const FORECAST_PATH: &str = "/v1/forecast";

    pub(crate) fn test_client(server: &MockServer) -> OpenMeteoClient {
        OpenMeteoClient::new(
            &format!("{}{}", server.uri(), FORECAST_PATH),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    pub(crate) fn daily_body(lat: f64, lon: f64) -> serde_json::Value {
        serde_json::json!({
            "latitude": lat,
            "longitude": lon,
            "timezone": "Europe/Berlin",
            "daily_units": {
                "time": "iso8601",
                "temperature_2m_max": "°C",
                "temperature_2m_min": "°C"
            },
            "daily": {
                "time": ["2026-10-19", "2026-10-20"],
                "temperature_2m_max": [14.2, 12.8],
                "temperature_2m_min": [6.1, null]
            }
        })
    }

    pub(crate) fn current_body(lat: f64, lon: f64, temperature: f64) -> serde_json::Value {
        serde_json::json!({
            "latitude": lat,
            "longitude": lon,
            "current_units": {
                "temperature_2m": "°C",
                "cloud_cover": "%",
                "wind_speed_80m": "km/h",
                "wind_direction_10m": "°",
                "uv_index": "",
                "weather_code": "wmo code"
            },
            "current": {
                "time": "2026-10-19T12:00",
                "temperature_2m": temperature,
                "cloud_cover": 75,
                "wind_speed_80m": 18.4,
                "wind_direction_10m": 240,
                "uv_index": 1.35,
                "weather_code": 3
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_daily_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .and(query_param("latitude", "52.5200"))
            .and(query_param("longitude", "13.4050"))
            .and(query_param("daily", "temperature_2m_max,temperature_2m_min"))
            .and(query_param("forecast_days", "7"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(daily_body(52.52, 13.41)))
            .expect(1)
            .mount(&server)
            .await;

        let metrics: Vec<String> = DEFAULT_DAILY_METRICS.iter().map(|m| m.to_string()).collect();
        let response = test_client(&server)
            .fetch_daily("52.5200", "13.4050", &metrics)
            .await
            .unwrap();

        assert_eq!(response.daily.time.len(), 2);
        assert_eq!(response.daily.temperature_2m_max, vec![Some(14.2), Some(12.8)]);
        assert_eq!(response.daily.temperature_2m_min, vec![Some(6.1), None]);
        assert_eq!(response.daily_units["temperature_2m_max"], "°C");
        assert!(response.hourly.time.is_empty());
        assert!(response.daily.extra.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_daily_keeps_other_metrics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .and(query_param("daily", "precipitation_sum,sunrise"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "daily_units": { "time": "iso8601", "precipitation_sum": "mm", "sunrise": "iso8601" },
                "daily": {
                    "time": ["2026-10-19", "2026-10-20"],
                    "precipitation_sum": [1.2, null],
                    "sunrise": ["2026-10-19T07:41", "2026-10-20T07:43"]
                }
            })))
            .mount(&server)
            .await;

        let metrics = vec!["precipitation_sum".to_string(), "sunrise".to_string()];
        let response = test_client(&server)
            .fetch_daily("52.5200", "13.4050", &metrics)
            .await
            .unwrap();

        let daily = &response.daily;
        assert_eq!(
            daily.extra["precipitation_sum"],
            vec![serde_json::json!(1.2), serde_json::Value::Null]
        );
        assert_eq!(daily.extra["sunrise"].len(), daily.time.len());
        assert!(daily.temperature_2m_max.is_empty());

        // Extra series serialize alongside the named ones
        let json = serde_json::to_value(daily).unwrap();
        assert_eq!(json["precipitation_sum"][0], 1.2);
        assert!(json.get("extra").is_none());
    }

    #[tokio::test]
    async fn test_fetch_current_joins_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .and(query_param("latitude", "52.5200,53.5511"))
            .and(query_param("longitude", "13.4050,9.9937"))
            .and(query_param("current", CURRENT_METRICS.join(",").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                current_body(52.52, 13.41, 11.0),
                current_body(53.55, 9.99, 9.5),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let responses = test_client(&server)
            .fetch_current(&["52.5200", "53.5511"], &["13.4050", "9.9937"])
            .await
            .unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].current.temperature_2m, Some(11.0));
        assert_eq!(responses[1].current.temperature_2m, Some(9.5));
        assert_eq!(responses[1].current.weather_code, Some(3));
        assert_eq!(responses[0].current_units["cloud_cover"], "%");
    }

    #[tokio::test]
    async fn test_fetch_current_single_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(current_body(52.52, 13.41, 4.0)),
            )
            .mount(&server)
            .await;

        let responses = test_client(&server)
            .fetch_current(&["52.5200"], &["13.4050"])
            .await
            .unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].current.temperature_2m, Some(4.0));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"daily\": ["))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .fetch_daily("1", "2", &["temperature_2m_max".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_scalar_batch_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("42"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .fetch_current(&["1"], &["2"])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_error_with_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": true,
                "reason": "Latitude must be in range of -90 to 90°."
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .fetch_daily("123", "2", &["temperature_2m_max".to_string()])
            .await
            .unwrap_err();
        match err {
            AppError::Fetch(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("Latitude must be in range"));
            }
            other => panic!("expected Fetch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_fetch_error() {
        // Port 1 is reserved and nothing listens there
        let client =
            OpenMeteoClient::new("http://127.0.0.1:1/v1/forecast", Duration::from_secs(2)).unwrap();

        let err = client.fetch_current(&["1"], &["2"]).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(FORECAST_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(daily_body(1.0, 2.0))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = OpenMeteoClient::new(
            &format!("{}{}", server.uri(), FORECAST_PATH),
            Duration::from_millis(200),
        )
        .unwrap();

        let err = client
            .fetch_daily("1", "2", &["temperature_2m_max".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
    }
}
