#![cfg(test)]
use configs::DatabaseConfig;
use models::db::{connect_with_config, ensure_schema};
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite store with the `product` table in place.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    ensure_schema(&db).await?;
    Ok(db)
}
