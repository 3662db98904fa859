//! Location registry on top of the collection store.
//!
//! IDs are derived from coordinates, never taken from the caller. `add`
//! probes for an existing record and then writes; the two steps are not
//! atomic, so two concurrent adds for the same coordinates can both succeed
//! and the last write wins.

use std::sync::Arc;

use crate::db::models::{Location, LOCATIONS_COLLECTION};
use crate::db::store::{CollectionStore, StoreError};
use crate::errors::AppError;
use crate::helpers::derive_location_id;

#[derive(Debug, Clone)]
pub struct LocationStore {
    store: Arc<dyn CollectionStore>,
}

impl LocationStore {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Persist a new location. The ID is derived from its coordinates.
    pub async fn add(&self, location: Location) -> Result<Location, AppError> {
        let location = Location {
            id: location.derived_id(),
            ..location
        };

        if self.exists(&location.id).await? {
            return Err(AppError::Duplicate(format!(
                "location with latitude {} and longitude {} already exists",
                location.latitude, location.longitude
            )));
        }

        let record = serde_json::to_value(&location)
            .map_err(|e| AppError::Write(format!("could not save location: {}", e)))?;
        self.store
            .write(LOCATIONS_COLLECTION, &location.id, &record)
            .await
            .map_err(|e| AppError::Write(format!("could not save location: {}", e)))?;

        tracing::info!("Location '{}' saved with ID {}", location.name, location.id);
        Ok(location)
    }

    /// Every stored location, ordered by ID. One undecodable record fails the
    /// whole listing.
    pub async fn list(&self) -> Result<Vec<Location>, AppError> {
        let records = self
            .store
            .read_all(LOCATIONS_COLLECTION)
            .await
            .map_err(|e| AppError::Read(format!("could not read locations: {}", e)))?;

        records
            .iter()
            .map(|raw| {
                serde_json::from_str::<Location>(raw)
                    .map_err(|e| AppError::Decode(format!("could not decode location: {}", e)))
            })
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Location, AppError> {
        match self.store.read(LOCATIONS_COLLECTION, id).await {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| AppError::Decode(format!("could not decode location {}: {}", id, e))),
            Err(StoreError::NotFound { .. }) | Err(StoreError::InvalidKey(_)) => Err(
                AppError::NotFound(format!("location with id {} does not exist", id)),
            ),
            Err(e) => Err(AppError::Read(format!(
                "could not read location {}: {}",
                id, e
            ))),
        }
    }

    /// Re-resolve a location by the ID derived from its coordinates.
    ///
    /// Used after an external call to pick up the current stored record
    /// (a renamed location shows its new name).
    pub async fn resolve(&self, latitude: &str, longitude: &str) -> Result<Location, AppError> {
        let id = derive_location_id(latitude, longitude);
        self.get(&id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(format!(
                "location with latitude {} and longitude {} does not exist",
                latitude, longitude
            )),
            other => other,
        })
    }

    /// Remove a location. A record that exists but cannot be decoded is
    /// removed too.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let name = match self.get(id).await {
            Ok(location) => Some(location.name),
            Err(AppError::Decode(e)) => {
                tracing::warn!("Deleting undecodable location {}: {}", id, e);
                None
            }
            Err(e) => return Err(e),
        };

        match self.store.delete(LOCATIONS_COLLECTION, id).await {
            Ok(()) => {
                tracing::info!(
                    "Location '{}' with ID {} deleted",
                    name.as_deref().unwrap_or_default(),
                    id
                );
                Ok(())
            }
            // Removed by someone else between the probe and the delete
            Err(StoreError::NotFound { .. }) => Err(AppError::NotFound(format!(
                "location with id {} does not exist",
                id
            ))),
            Err(e) => Err(AppError::Delete(format!(
                "could not delete location with id {}: {}",
                id, e
            ))),
        }
    }

    /// Idempotent bulk load. Existing entries are skipped and per-entry
    /// failures are logged; this never fails. Returns how many were added.
    pub async fn seed(&self, defaults: &[(&str, &str, &str)]) -> usize {
        let mut added = 0;

        for &(name, latitude, longitude) in defaults {
            let location = Location::new(name, latitude, longitude);
            let id = location.id.clone();

            match self.add(location).await {
                Ok(_) => added += 1,
                Err(AppError::Duplicate(_)) => {
                    tracing::info!("Location '{}' with ID {} already exists, skipping", name, id);
                }
                Err(e) => tracing::warn!("Failed to seed location '{}': {}", name, e),
            }
        }

        tracing::info!(
            "Seeded {} of {} default locations",
            added,
            defaults.len()
        );
        added
    }

    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        match self.get(id).await {
            Ok(_) => Ok(true),
            Err(AppError::NotFound(_)) => Ok(false),
            // A record that is present but undecodable still occupies the ID
            Err(AppError::Decode(_)) => Ok(true),
            Err(e) => Err(e),
        }
    }
}
