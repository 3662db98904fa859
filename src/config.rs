use std::time::Duration;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root directory of the JSON collection store.
    pub data_dir: String,
    pub port: u16,
    /// Open-Meteo forecast endpoint (overridable for self-hosted instances).
    pub open_meteo_url: String,
    /// Upper bound on a single provider request, connect + body.
    pub http_timeout: Duration,
    /// Load the default German state locations at startup.
    pub seed_default_locations: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
            port: parse_or_default("PORT", DEFAULT_PORT),
            open_meteo_url: std::env::var("OPEN_METEO_URL")
                .unwrap_or_else(|_| DEFAULT_OPEN_METEO_URL.to_string()),
            http_timeout: Duration::from_secs(parse_or_default(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            seed_default_locations: parse_or_default("SEED_DEFAULT_LOCATIONS", true),
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value '{}' for {}, using default {}", raw, key, default);
            default
        }),
        Err(_) => default,
    }
}
