use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

use crate::config::Config;
use crate::db::error::{StoreError, StoreResult};

pub async fn get_db_pool(config: &Config) -> StoreResult<Pool<Postgres>> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| StoreError::InvalidData("DATABASE_URL must be set".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .idle_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;

    Ok(pool)
}
