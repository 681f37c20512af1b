use axum::{extract::{Path, Query, State}, Json};
use common::types::Message;
use models::address::{self, AddressInput};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    /// Center latitude in degrees
    pub latitude: f64,
    /// Center longitude in degrees
    pub longitude: f64,
    /// Search radius in kilometres, boundary inclusive
    pub distance_km: f64,
}

#[utoipa::path(post, path = "/addresses", tag = "addresses", request_body = crate::openapi::AddressInputDoc, responses((status = 200, description = "Created", body = crate::openapi::AddressDoc), (status = 422, description = "Missing or malformed fields")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<AddressInput>,
) -> Result<Json<address::Model>, JsonApiError> {
    info!(street = %input.street, city = %input.city, "create_address_request");
    let created = state.addresses.create(input).await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/addresses", tag = "addresses", responses((status = 200, description = "All addresses", body = [crate::openapi::AddressDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<address::Model>>, JsonApiError> {
    let all = state.addresses.list().await?;
    info!(count = all.len(), "list addresses");
    Ok(Json(all))
}

#[utoipa::path(get, path = "/addresses/{id}", tag = "addresses", params(("id" = i32, Path, description = "Address id")), responses((status = 200, description = "Found", body = crate::openapi::AddressDoc), (status = 404, description = "Address not found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<address::Model>, JsonApiError> {
    Ok(Json(state.addresses.get(id).await?))
}

#[utoipa::path(put, path = "/addresses/{id}", tag = "addresses", params(("id" = i32, Path, description = "Address id")), request_body = crate::openapi::AddressInputDoc, responses((status = 200, description = "Updated", body = crate::openapi::AddressDoc), (status = 404, description = "Address not found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<AddressInput>,
) -> Result<Json<address::Model>, JsonApiError> {
    let updated = state.addresses.update(id, input).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/addresses/{id}", tag = "addresses", params(("id" = i32, Path, description = "Address id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Address not found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Message>, JsonApiError> {
    state.addresses.delete(id).await?;
    Ok(Json(Message::new("Deleted successfully")))
}

#[utoipa::path(get, path = "/addresses/nearby", tag = "addresses", params(NearbyQuery), responses((status = 200, description = "Addresses within the radius, in store order", body = [crate::openapi::AddressDoc])))]
pub async fn nearby(
    State(state): State<ServerState>,
    Query(q): Query<NearbyQuery>,
) -> Result<Json<Vec<address::Model>>, JsonApiError> {
    let found = state.addresses.nearby(q.latitude, q.longitude, q.distance_km).await?;
    Ok(Json(found))
}
