use sea_orm::{DbErr, SqlErr};

use crate::storage::{ShortLink, StoreError};
use migration::entities::url;

pub fn model_to_shortlink(model: url::Model) -> ShortLink {
    ShortLink {
        id: model.id,
        alias: model.alias,
        target: model.target,
    }
}

pub fn new_active_model(target: &str, alias: &str) -> url::ActiveModel {
    use sea_orm::ActiveValue::*;

    url::ActiveModel {
        id: NotSet,
        alias: Set(alias.to_string()),
        target: Set(target.to_string()),
    }
}

/// Map a driver error onto the store's error kinds.
///
/// A unique-constraint violation is the only fault that means "alias taken";
/// everything else is reported as transient.
pub fn classify_db_error(err: DbErr, alias: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::AliasConflict(alias.to_string()),
        _ => StoreError::Transient(err.to_string()),
    }
}
