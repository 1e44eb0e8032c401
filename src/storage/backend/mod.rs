//! SeaORM storage backend
//!
//! SQLite, MySQL/MariaDB and PostgreSQL behind one [`LinkStore`] impl.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{Result, ShortgateError};
use crate::storage::{LinkStore, ShortLink, StoreResult};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::classify_db_error;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ShortgateError::config(format!(
            "cannot infer database type from URL '{}'. Supported: memory://, sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

#[derive(Clone)]
pub struct SeaOrmLinkStore {
    db: DatabaseConnection,
    backend_name: &'static str,
    retry_config: retry::RetryConfig,
}

impl SeaOrmLinkStore {
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        let retry_config = retry::RetryConfig {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        };

        let (db, backend_name) = match backend_name {
            "sqlite" => (connect_sqlite(database_url).await?, "sqlite"),
            "mysql" => (
                connect_generic(database_url, backend_name, config.pool_size).await?,
                "mysql",
            ),
            "postgres" => (
                connect_generic(database_url, backend_name, config.pool_size).await?,
                "postgres",
            ),
            other => {
                return Err(ShortgateError::config(format!(
                    "unsupported database backend: {}",
                    other
                )));
            }
        };

        run_migrations(&db).await?;

        info!("{} link store initialized", backend_name.to_uppercase());
        Ok(Self {
            db,
            backend_name,
            retry_config,
        })
    }
}

#[async_trait]
impl LinkStore for SeaOrmLinkStore {
    async fn save(&self, target: &str, alias: &str) -> StoreResult<ShortLink> {
        self.insert_link(target, alias).await
    }

    async fn get(&self, alias: &str) -> StoreResult<ShortLink> {
        self.find_by_alias(alias).await
    }

    async fn delete(&self, alias: &str) -> StoreResult<()> {
        self.delete_by_alias(alias).await
    }

    fn backend_name(&self) -> &'static str {
        self.backend_name
    }
}
