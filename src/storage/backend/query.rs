//! Read operations for SeaOrmLinkStore

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::SeaOrmLinkStore;
use super::converters::model_to_shortlink;
use super::retry;
use crate::storage::{ShortLink, StoreError, StoreResult};

use migration::entities::url;

impl SeaOrmLinkStore {
    pub(super) async fn find_by_alias(&self, alias: &str) -> StoreResult<ShortLink> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get({})", alias), self.retry_config, || async {
            url::Entity::find()
                .filter(url::Column::Alias.eq(alias))
                .one(db)
                .await
        })
        .await
        .map_err(|e| StoreError::Transient(e.to_string()))?;

        model
            .map(model_to_shortlink)
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }
}
