//! Write operations for SeaOrmLinkStore

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use super::SeaOrmLinkStore;
use super::converters::{classify_db_error, new_active_model};
use crate::storage::{ShortLink, StoreError, StoreResult};

use migration::entities::url;

impl SeaOrmLinkStore {
    /// Plain INSERT; the unique index on `alias` arbitrates concurrent writers.
    pub(super) async fn insert_link(&self, target: &str, alias: &str) -> StoreResult<ShortLink> {
        let result = url::Entity::insert(new_active_model(target, alias))
            .exec(&self.db)
            .await
            .map_err(|e| classify_db_error(e, alias))?;

        info!(alias, id = result.last_insert_id, "Short link saved");
        Ok(ShortLink {
            id: result.last_insert_id,
            alias: alias.to_string(),
            target: target.to_string(),
        })
    }

    pub(super) async fn delete_by_alias(&self, alias: &str) -> StoreResult<()> {
        let result = url::Entity::delete_many()
            .filter(url::Column::Alias.eq(alias))
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::Transient(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(alias.to_string()));
        }

        info!(alias, "Short link deleted");
        Ok(())
    }
}
