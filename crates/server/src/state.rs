use std::sync::Arc;

use service::address::{AddressRepository, AddressService, InMemoryAddressRepository, SeaOrmAddressRepository};
use sea_orm::DatabaseConnection;

/// Shared router state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub addresses: AddressService<dyn AddressRepository>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn AddressRepository>) -> Self {
        Self { addresses: AddressService::new(repo) }
    }

    pub fn with_database(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmAddressRepository::new(db)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryAddressRepository::new()))
    }
}
