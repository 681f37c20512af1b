use std::sync::Arc;

use models::address::{self, AddressInput};
use tracing::{info, instrument};

use crate::address::repository::AddressRepository;
use crate::errors::ServiceError;
use crate::geo;

const ENTITY: &str = "Address";

/// Application service for addresses.
/// Turns absent rows into `NotFound` and runs proximity queries over the store.
pub struct AddressService<R: AddressRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: AddressRepository + ?Sized> Clone for AddressService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: AddressRepository + ?Sized> AddressService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip_all, fields(street = %input.street, city = %input.city))]
    pub async fn create(&self, input: AddressInput) -> Result<address::Model, ServiceError> {
        let created = self.repo.insert(input).await?;
        info!(id = created.id, "address_created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<address::Model>, ServiceError> {
        self.repo.list_all().await
    }

    pub async fn get(&self, id: i32) -> Result<address::Model, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    /// Full replacement of every field; never creates a row.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: AddressInput) -> Result<address::Model, ServiceError> {
        let updated = self.repo.replace(id, input).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        info!("address_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<address::Model, ServiceError> {
        let removed = self.repo.remove(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        info!("address_deleted");
        Ok(removed)
    }

    /// Stored addresses within `radius_km` of the center, in store order.
    #[instrument(skip(self))]
    pub async fn nearby(&self, latitude: f64, longitude: f64, radius_km: f64) -> Result<Vec<address::Model>, ServiceError> {
        if !latitude.is_finite() || !longitude.is_finite() || radius_km.is_nan() {
            return Err(ServiceError::Validation("latitude, longitude and distance_km must be numbers".into()));
        }
        let candidates = self.repo.list_all().await?;
        let total = candidates.len();
        let found = geo::find_within(latitude, longitude, radius_km, candidates);
        info!(total, matched = found.len(), "nearby_query");
        Ok(found)
    }
}
