use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes::{self, auth::ServerState};
use service::kitchen::{repo::MongoDocumentStore, LazyStore};
use service::errors::ServiceError;
use service::{DocumentStore, KitchenService, TokenService};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Assemble the router around an already-built store.
pub fn build_app(cfg: &AppConfig, store: Arc<dyn DocumentStore>) -> Router {
    let tokens = TokenService::new(&cfg.auth.access_secret_token, cfg.auth.token_ttl_secs);
    let state = ServerState::new(KitchenService::new(store), tokens);
    routes::build_router(state, build_cors())
}

/// MongoDB store that builds its client on first use and retries after a
/// failed attempt, so a transient SRV/DNS failure at boot is not permanent.
fn mongo_store(cfg: &AppConfig) -> Arc<dyn DocumentStore> {
    let database = cfg.database.clone();
    Arc::new(LazyStore::new(move || {
        let database = database.clone();
        async move {
            let db = models::db::connect(&database).await?;
            Ok::<Arc<dyn DocumentStore>, ServiceError>(Arc::new(MongoDocumentStore::new(db)))
        }
    }))
}

/// Public entry: build the app around a lazily connected store and run the HTTP server.
///
/// Connection failures are logged and the server keeps listening; each
/// request then reports the store error as a 500 until a connection succeeds.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = mongo_store(&cfg);

    let probe = Arc::clone(&store);
    tokio::spawn(async move {
        if let Err(e) = probe.ping().await {
            error!(error = %e, "database ping failed; serving anyway");
        }
    });

    let app = build_app(&cfg, store);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Miah Kitchen server running");
    axum::serve(listener, app).await?;
    Ok(())
}
