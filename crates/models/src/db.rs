use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

use crate::{errors::ModelError, product};

/// Open a pooled connection using the pool settings of `cfg`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opts).await.map_err(|e| ModelError::Connect(e.to_string()))?;
    info!(
        backend = ?db.get_database_backend(),
        max_connections = cfg.max_connections,
        min_connections = cfg.min_connections,
        "database_connected"
    );
    Ok(db)
}

/// Create the `product` table from the entity definition if it is missing.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), ModelError> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(product::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await.map_err(|e| ModelError::Db(e.to_string()))?;
    debug!(table = "product", "schema_ready");
    Ok(())
}
