//! Link storage
//!
//! `LinkStore` is the only way the rest of the crate touches persisted links.
//! Every backend classifies its own faults into [`StoreError`] before
//! returning, so callers never see driver errors.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{Result, ShortgateError};

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SeaOrmLinkStore;
pub use memory::InMemoryLinkStore;
pub use models::ShortLink;

/// Classified store failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The alias is already taken; carries the alias
    AliasConflict(String),
    /// No row for the alias; carries the alias
    NotFound(String),
    /// Connectivity, timeout or any other backend fault
    Transient(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::AliasConflict(alias) => write!(f, "alias '{}' already exists", alias),
            StoreError::NotFound(alias) => write!(f, "alias '{}' not found", alias),
            StoreError::Transient(msg) => write!(f, "transient store error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Alias → URL persistence
///
/// All operations are safe to call concurrently. Uniqueness of `alias` is
/// enforced atomically by the backend, never by application locks.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a new mapping. Never overwrites: an existing alias yields
    /// [`StoreError::AliasConflict`].
    async fn save(&self, target: &str, alias: &str) -> StoreResult<ShortLink>;

    /// Exact-match lookup.
    async fn get(&self, alias: &str) -> StoreResult<ShortLink>;

    /// Remove a mapping. Zero affected rows is [`StoreError::NotFound`],
    /// including for a second delete of the same alias.
    async fn delete(&self, alias: &str) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    /// Build the store selected by `database.database_url`.
    ///
    /// `memory://` selects the in-process store; anything else goes through
    /// sea-orm with the backend inferred from the URL.
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn LinkStore>> {
        let database_url = config.database_url.trim();
        if database_url.is_empty() {
            return Err(ShortgateError::config("database.database_url is not set"));
        }

        if database_url == "memory://" {
            info!("Using in-memory link store; links are lost on restart");
            return Ok(Arc::new(InMemoryLinkStore::new()));
        }

        let backend_type = backend::infer_backend_from_url(database_url)?;
        let store = SeaOrmLinkStore::new(database_url, &backend_type, config).await?;
        Ok(Arc::new(store))
    }
}
