use serde::{Deserialize, Serialize};

use crate::helpers::derive_location_id;

/// Collection holding every tracked location.
pub const LOCATIONS_COLLECTION: &str = "locations";

/// A named geographic point, persisted as one JSON record.
///
/// Coordinates are kept as the exact decimal strings the client supplied so
/// they round-trip to the weather provider unchanged. `id` is always
/// `latitude + "_" + longitude`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub latitude: String,
    pub longitude: String,
}

impl Location {
    /// Build a location with its derived ID.
    pub fn new(
        name: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        let latitude = latitude.into();
        let longitude = longitude.into();
        Self {
            id: derive_location_id(&latitude, &longitude),
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// ID derived from the current coordinates, ignoring whatever `id` holds.
    pub fn derived_id(&self) -> String {
        derive_location_id(&self.latitude, &self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_id() {
        let loc = Location::new("Berlin", "52.5200", "13.4050");
        assert_eq!(loc.id, "52.5200_13.4050");
        assert_eq!(loc.derived_id(), loc.id);
    }

    #[test]
    fn test_derived_id_ignores_stale_id() {
        let mut loc = Location::new("Bremen", "53.0793", "8.8017");
        loc.id = "client-supplied".to_string();
        assert_eq!(loc.derived_id(), "53.0793_8.8017");
    }

    #[test]
    fn test_missing_name_deserializes_empty() {
        let loc: Location =
            serde_json::from_str(r#"{"id":"1_2","latitude":"1","longitude":"2"}"#).unwrap();
        assert_eq!(loc.name, "");
    }
}
