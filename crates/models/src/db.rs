use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Database,
};
use tracing::{debug, info};

use configs::DatabaseConfig;

use crate::errors::ModelError;

/// Build a client for the configured deployment and hand back the database handle.
///
/// The driver connects lazily, so this only fails on a malformed connection
/// string or an unresolvable SRV record; use [`ping`] to probe the server.
pub async fn connect(cfg: &DatabaseConfig) -> Result<Database, ModelError> {
    let mut options = ClientOptions::parse(&cfg.uri)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    options.app_name = Some("miah-kitchen".to_string());
    let client = Client::with_options(options).map_err(|e| ModelError::Db(e.to_string()))?;
    debug!(database = %cfg.name, "mongodb client created");
    Ok(client.database(&cfg.name))
}

/// Round-trip a `ping` command against the deployment.
pub async fn ping(db: &Database) -> Result<(), ModelError> {
    db.run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    info!(database = %db.name(), "mongodb ping ok");
    Ok(())
}
