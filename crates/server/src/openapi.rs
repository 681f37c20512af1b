use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct AddressInputDoc {
    pub street: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(ToSchema)]
pub struct AddressDoc {
    pub id: i32,
    pub street: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    info(title = "Address Book API"),
    paths(
        crate::routes::health,
        crate::addresses::create,
        crate::addresses::list,
        crate::addresses::get,
        crate::addresses::update,
        crate::addresses::delete,
        crate::addresses::nearby,
    ),
    components(
        schemas(
            HealthResponse,
            AddressInputDoc,
            AddressDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "addresses")
    )
)]
pub struct ApiDoc;
