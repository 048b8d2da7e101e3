//! Database configuration for the remote store.
//!
//! Handles the `SQLite` connection and creates the `documents` table from its entity definition
//! with `SeaORM`'s `Schema::create_table_from_entity`, so the schema always matches the Rust
//! model without hand-written SQL.

use super::AppConfig;
use crate::entities::StoredDocument;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Used when neither `config.toml` nor `DATABASE_URL` names a database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/hisab.sqlite?mode=rwc";

/// Database URL from the loaded configuration, which already reflects `DATABASE_URL`.
#[must_use]
pub fn get_database_url(config: &AppConfig) -> &str {
    &config.database_url
}

/// Connects to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    info!("Connected to remote store database");
    Ok(db)
}

/// Creates the `documents` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut documents = schema.create_table_from_entity(StoredDocument);
    documents.if_not_exists();
    db.execute(builder.build(&documents)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::DocumentModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<DocumentModel> = StoredDocument::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_database_url_comes_from_config() {
        let config = AppConfig::default();
        assert_eq!(get_database_url(&config), DEFAULT_DATABASE_URL);
    }
}
