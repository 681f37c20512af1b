use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub street: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// User-supplied address fields, used for both create and full replacement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AddressInput {
    /// Overwrite every user-editable column of `am`.
    pub fn apply_to(self, am: &mut ActiveModel) {
        am.street = Set(self.street);
        am.city = Set(self.city);
        am.latitude = Set(self.latitude);
        am.longitude = Set(self.longitude);
    }

    /// Build the stored record for an already assigned identifier.
    pub fn into_model(self, id: i32) -> Model {
        Model {
            id,
            street: self.street,
            city: self.city,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Coordinates must be finite numbers; their range is deliberately unchecked.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), errors::ModelError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(errors::ModelError::Validation("latitude and longitude must be finite numbers".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, input: AddressInput) -> Result<Model, errors::ModelError> {
    validate_coordinates(input.latitude, input.longitude)?;
    let mut am = ActiveModel { ..Default::default() };
    input.apply_to(&mut am);
    Ok(am.insert(db).await?)
}

/// All rows in insertion (identifier) order.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn replace(db: &DatabaseConnection, id: i32, input: AddressInput) -> Result<Option<Model>, errors::ModelError> {
    validate_coordinates(input.latitude, input.longitude)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    input.apply_to(&mut am);
    Ok(Some(am.update(db).await?))
}

pub async fn remove(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    Entity::delete_by_id(id).exec(db).await?;
    Ok(Some(found))
}
