//! Shared helpers for location identity and comma-joined parameter lists.
//!
//! Location IDs are built from the literal coordinate strings. No numeric
//! normalization happens: `"9.50"` and `"9.5"` name two different locations.
//! Every lookup must go through `derive_location_id` with the same strings
//! that were used on create.

/// Separator between latitude and longitude in a location ID.
pub(crate) const ID_SEPARATOR: &str = "_";

/// Derive the stable location ID for a coordinate pair.
pub(crate) fn derive_location_id(latitude: &str, longitude: &str) -> String {
    format!("{}{}{}", latitude, ID_SEPARATOR, longitude)
}

/// Split a comma-separated list, dropping blank entries.
pub(crate) fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
