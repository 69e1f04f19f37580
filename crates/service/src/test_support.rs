#![cfg(test)]
use configs::DatabaseConfig;
use models::db::{connect_with_config, migrate};
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with every migration applied.
///
/// Each call gets its own database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".to_string(), ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
