use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use service::kitchen::store::mock::MemoryStore;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = configs::AppConfig::default();
    cfg.auth.access_secret_token = "test-secret".into();
    let app = server::startup::build_app(&cfg, Arc::new(MemoryStore::new()));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_greeting() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "Hello from Miah Kitchen server");
    Ok(())
}

#[tokio::test]
async fn e2e_order_flow_with_token() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    for (email, item) in [("a@b.com", "biryani"), ("x@y.com", "kebab")] {
        let res = c.post(format!("{}/orders", app.base_url))
            .json(&json!({ "email": email, "item": item }))
            .send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }

    // mint a token for a@b.com
    let res = c.post(format!("{}/jwt", app.base_url))
        .json(&json!({ "email": "a@b.com" }))
        .send().await?;
    let token = res.json::<serde_json::Value>().await?["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let res = c.get(format!("{}/orders?email=a@b.com", app.base_url))
        .bearer_auth(&token)
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let orders = res.json::<serde_json::Value>().await?;
    assert_eq!(orders.as_array().map(Vec::len), Some(1));
    assert_eq!(orders[0]["item"], "biryani");

    let res = c.get(format!("{}/orders?email=x@y.com", app.base_url))
        .bearer_auth(&token)
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);

    let res = c.get(format!("{}/orders?email=a@b.com", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_preflight_is_allowed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/orders", app.base_url))
        .header("origin", "https://miahkitchen.example")
        .header("access-control-request-method", "GET")
        .header("access-control-request-headers", "authorization")
        .send().await?;
    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
