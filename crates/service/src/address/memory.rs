use std::collections::BTreeMap;

use async_trait::async_trait;
use models::address::{self, AddressInput};
use tokio::sync::RwLock;

use crate::address::repository::AddressRepository;
use crate::errors::ServiceError;

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, address::Model>,
}

/// Process-local store. Identifiers are never reused, matching an
/// auto-increment column.
#[derive(Default)]
pub struct InMemoryAddressRepository {
    inner: RwLock<Table>,
}

impl InMemoryAddressRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn insert(&self, input: AddressInput) -> Result<address::Model, ServiceError> {
        address::validate_coordinates(input.latitude, input.longitude)?;
        let mut table = self.inner.write().await;
        table.last_id += 1;
        let model = input.into_model(table.last_id);
        table.rows.insert(model.id, model.clone());
        Ok(model)
    }

    async fn list_all(&self) -> Result<Vec<address::Model>, ServiceError> {
        let table = self.inner.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<address::Model>, ServiceError> {
        let table = self.inner.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn replace(&self, id: i32, input: AddressInput) -> Result<Option<address::Model>, ServiceError> {
        address::validate_coordinates(input.latitude, input.longitude)?;
        let mut table = self.inner.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = input.into_model(id);
        Ok(Some(row.clone()))
    }

    async fn remove(&self, id: i32) -> Result<Option<address::Model>, ServiceError> {
        let mut table = self.inner.write().await;
        Ok(table.rows.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(street: &str) -> AddressInput {
        AddressInput { street: street.into(), city: "Oslo".into(), latitude: 59.91, longitude: 10.75 }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() -> Result<(), ServiceError> {
        let repo = InMemoryAddressRepository::new();
        let a = repo.insert(input("a")).await?;
        repo.remove(a.id).await?;
        let b = repo.insert(input("b")).await?;
        assert!(b.id > a.id);
        assert_eq!(repo.list_all().await?, vec![b]);
        Ok(())
    }

    #[tokio::test]
    async fn replace_missing_does_not_insert() -> Result<(), ServiceError> {
        let repo = InMemoryAddressRepository::new();
        assert!(repo.replace(5, input("ghost")).await?.is_none());
        assert!(repo.list_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn rejects_non_finite_coordinates() {
        let repo = InMemoryAddressRepository::new();
        let mut bad = input("nan");
        bad.latitude = f64::NAN;
        let err = repo.insert(bad).await.unwrap_err();
        assert!(err.is_validation());
    }
}
