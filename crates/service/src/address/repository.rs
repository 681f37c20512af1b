use async_trait::async_trait;
use models::address::{self, AddressInput};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Keyed storage of addresses. `None` means the identifier does not exist.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn insert(&self, input: AddressInput) -> Result<address::Model, ServiceError>;
    async fn list_all(&self) -> Result<Vec<address::Model>, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<address::Model>, ServiceError>;
    async fn replace(&self, id: i32, input: AddressInput) -> Result<Option<address::Model>, ServiceError>;
    async fn remove(&self, id: i32) -> Result<Option<address::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmAddressRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn insert(&self, input: AddressInput) -> Result<address::Model, ServiceError> {
        Ok(address::create(&self.db, input).await?)
    }

    async fn list_all(&self) -> Result<Vec<address::Model>, ServiceError> {
        Ok(address::list_all(&self.db).await?)
    }

    async fn find(&self, id: i32) -> Result<Option<address::Model>, ServiceError> {
        Ok(address::find(&self.db, id).await?)
    }

    async fn replace(&self, id: i32, input: AddressInput) -> Result<Option<address::Model>, ServiceError> {
        Ok(address::replace(&self.db, id, input).await?)
    }

    async fn remove(&self, id: i32) -> Result<Option<address::Model>, ServiceError> {
        Ok(address::remove(&self.db, id).await?)
    }
}
