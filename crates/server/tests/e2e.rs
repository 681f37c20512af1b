use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::ServerState;

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn spawn(state: ServerState) -> anyhow::Result<TestApp> {
    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn start_in_memory() -> anyhow::Result<TestApp> {
    spawn(ServerState::in_memory()).await
}

async fn start_sqlite() -> anyhow::Result<TestApp> {
    let db = models::db::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    spawn(ServerState::with_database(db)).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn address(street: &str, latitude: f64, longitude: f64) -> Value {
    json!({"street": street, "city": "Lisbon", "latitude": latitude, "longitude": longitude})
}

async fn create(app: &TestApp, body: Value) -> anyhow::Result<Value> {
    let res = client().post(app.url("/addresses")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Value>().await?)
}

async fn list(app: &TestApp) -> anyhow::Result<Vec<Value>> {
    let res = client().get(app.url("/addresses")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Vec<Value>>().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_in_memory().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_lists_address_paths() -> anyhow::Result<()> {
    let app = start_in_memory().await?;
    let res = client().get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/addresses"].is_object());
    assert!(doc["paths"]["/addresses/nearby"].is_object());
    assert!(doc["paths"]["/addresses/{id}"].is_object());
    Ok(())
}

async fn crud_roundtrip(app: TestApp) -> anyhow::Result<()> {
    let c = client();

    let created = create(&app, address("Rua Augusta 1", 38.7101, -9.1368)).await?;
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["street"], "Rua Augusta 1");

    let all = list(&app).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], json!({
        "id": id,
        "street": "Rua Augusta 1",
        "city": "Lisbon",
        "latitude": 38.7101,
        "longitude": -9.1368
    }));

    let res = c.get(app.url(&format!("/addresses/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.put(app.url(&format!("/addresses/{id}")))
        .json(&address("Rua do Ouro 5", 38.7105, -9.1377))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["street"], "Rua do Ouro 5");
    assert_eq!(updated["longitude"], -9.1377);

    let res = c.delete(app.url(&format!("/addresses/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Deleted successfully"}));
    assert!(list(&app).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_crud_roundtrip_in_memory() -> anyhow::Result<()> {
    crud_roundtrip(start_in_memory().await?).await
}

#[tokio::test]
async fn e2e_crud_roundtrip_sqlite() -> anyhow::Result<()> {
    crud_roundtrip(start_sqlite().await?).await
}

#[tokio::test]
async fn e2e_missing_ids_are_404() -> anyhow::Result<()> {
    let app = start_sqlite().await?;
    let c = client();
    let kept = create(&app, address("Kept", 0.0, 0.0)).await?;

    let res = c.put(app.url("/addresses/9999")).json(&address("Ghost", 1.0, 1.0)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["detail"], "Address not found");

    let res = c.delete(app.url("/addresses/9999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(app.url("/addresses/9999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    assert_eq!(list(&app).await?, vec![kept]);
    Ok(())
}

#[tokio::test]
async fn e2e_storage_failure_is_500_with_json_body() -> anyhow::Result<()> {
    // schema never applied, so every query hits a missing table
    let db = models::db::connect("sqlite::memory:").await?;
    let app = spawn(ServerState::with_database(db)).await?;
    let c = client();

    let res = c.get(app.url("/addresses")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Internal Server Error");
    let detail = body["detail"].as_str().expect("detail is a string");
    assert!(detail.starts_with("database error:"), "{detail}");
    assert!(detail.contains("address"), "{detail}");

    let res = c.post(app.url("/addresses")).json(&address("Nowhere", 0.0, 0.0)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?["error"], "Internal Server Error");
    Ok(())
}

#[tokio::test]
async fn e2e_nearby_filters_inclusively_in_store_order() -> anyhow::Result<()> {
    let app = start_in_memory().await?;
    let c = client();
    let far = create(&app, address("far", 0.0, 1.0)).await?;
    create(&app, address("away", 10.0, 10.0)).await?;
    let center = create(&app, address("center", 0.0, 0.0)).await?;

    let res = c.get(app.url("/addresses/nearby"))
        .query(&[("latitude", "0"), ("longitude", "0"), ("distance_km", "111.2")])
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Vec<Value>>().await?, vec![far, center.clone()]);

    let res = c.get(app.url("/addresses/nearby"))
        .query(&[("latitude", "0"), ("longitude", "0"), ("distance_km", "0")])
        .send().await?;
    assert_eq!(res.json::<Vec<Value>>().await?, vec![center]);
    Ok(())
}

#[tokio::test]
async fn e2e_nearby_on_empty_store() -> anyhow::Result<()> {
    let app = start_in_memory().await?;
    let res = client().get(app.url("/addresses/nearby?latitude=12.5&longitude=-3&distance_km=500")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.json::<Vec<Value>>().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_input_is_rejected() -> anyhow::Result<()> {
    let app = start_in_memory().await?;
    let c = client();

    let res = c.post(app.url("/addresses"))
        .json(&json!({"street": "No coords", "city": "Lisbon"}))
        .send().await?;
    assert!(res.status().is_client_error());

    let res = c.get(app.url("/addresses/nearby?latitude=1&longitude=2")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.get(app.url("/addresses/nearby?latitude=NaN&longitude=2&distance_km=5")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    assert!(list(&app).await?.is_empty());
    Ok(())
}
