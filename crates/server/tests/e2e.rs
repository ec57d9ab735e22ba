use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use configs::AppConfig;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    cfg.database.min_connections = 1;
    cfg.database.max_connections = 1;
    cfg.database.connect_timeout_secs = 5;
    cfg.database.acquire_timeout_secs = 5;
    cfg.auth.jwt_secret = "e2e-secret".into();
    cfg.server.frontend_dir = "target/test-frontend-missing".into();

    let app = server::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, client: reqwest::Client::new() })
}

#[tokio::test]
async fn e2e_owner_lifecycle_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    let url = |p: &str| format!("{}{}", app.base_url, p);

    let resp = app.client.get(url("/api/check")).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);

    let creds = json!({"email": "e2e@clinic.test", "password": "S3curePass!"});
    let resp = app.client.post(url("/api/auth/register")).json(&creds).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);

    let login: Value = app.client.post(url("/api/auth/login")).json(&creds).send().await?.json().await?;
    let token = login["accessToken"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let resp = app.client.get(url("/api/owners")).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::UNAUTHORIZED);

    let owner: Value = app.client
        .post(url("/api/owners"))
        .bearer_auth(&token)
        .json(&json!({"fullName": "Hugo Marín", "phone": "555 0199", "address": "Av. Sol 42"}))
        .send()
        .await?
        .json()
        .await?;
    let owner_id = owner["id"].as_str().unwrap_or_default().to_string();

    let patched: Value = app.client
        .patch(url(&format!("/api/owners/{owner_id}")))
        .bearer_auth(&token)
        .json(&json!({"phone": "555 0200"}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(patched["phone"], "555 0200");
    assert_eq!(patched["fullName"], "Hugo Marín");

    let pet = app.client
        .post(url("/api/pets"))
        .bearer_auth(&token)
        .json(&json!({"name": "Trufa", "species": "dog", "ownerId": owner_id}))
        .send()
        .await?;
    assert_eq!(pet.status(), HttpStatusCode::CREATED);

    let listed: Value = app.client
        .get(url(&format!("/api/pets?ownerId={owner_id}")))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let resp = app.client.delete(url(&format!("/api/owners/{owner_id}"))).bearer_auth(&token).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);

    let listed: Value = app.client.get(url("/api/pets")).bearer_auth(&token).send().await?.json().await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
    Ok(())
}
