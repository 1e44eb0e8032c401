//! Link operations
//!
//! Consumes the per-request [`AuthOutcome`] and talks to the [`LinkStore`].
//! Nothing here touches the store before the outcome has been checked.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::auth::{AuthFailure, AuthOutcome, Principal};
use crate::config::LinksConfig;
use crate::errors::ShortgateError;
use crate::storage::{LinkStore, ShortLink, StoreError};
use crate::utils::{generate_alias, is_reserved_alias, is_valid_alias, validate_url};

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct SaveLinkRequest {
    pub target: String,
    /// Caller-chosen alias; generated when absent or empty
    pub alias: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: ShortLink,
    pub generated_alias: bool,
}

/// Map a non-authenticated outcome to the error the caller sees.
fn auth_rejection(outcome: &AuthOutcome) -> ShortgateError {
    match outcome {
        AuthOutcome::Unauthenticated => ShortgateError::unauthenticated("authorization required"),
        AuthOutcome::Failed(AuthFailure::InvalidToken) => {
            ShortgateError::invalid_credential("invalid token")
        }
        AuthOutcome::Failed(AuthFailure::PermissionCheckFailed) => {
            ShortgateError::permission_check_failed("failed to check if user is admin")
        }
        AuthOutcome::Authenticated { .. } => ShortgateError::authorization_denied("forbidden"),
    }
}

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    alias_length: usize,
    max_alias_attempts: u32,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, config: &LinksConfig) -> Self {
        Self {
            store,
            alias_length: config.alias_length,
            max_alias_attempts: config.max_alias_attempts.max(1),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    fn store_failure(&self, alias: &str, err: StoreError) -> ShortgateError {
        if let StoreError::Transient(detail) = &err {
            error!(alias, backend = self.store.backend_name(), "store failure: {}", detail);
        }
        err.into()
    }

    /// Create a mapping for an authenticated caller.
    pub async fn handle_save(
        &self,
        outcome: AuthOutcome,
        req: SaveLinkRequest,
    ) -> Result<LinkCreateResult, ShortgateError> {
        let principal = match &outcome {
            AuthOutcome::Authenticated { principal, .. } => principal,
            other => return Err(auth_rejection(other)),
        };

        validate_url(&req.target)?;
        let target = req.target.trim();

        match req.alias.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            Some(alias) => {
                if !is_valid_alias(alias) {
                    return Err(ShortgateError::validation(
                        "alias must be 1-64 characters of A-Z, a-z, 0-9, '-' or '_'",
                    ));
                }
                if is_reserved_alias(alias) {
                    return Err(ShortgateError::validation(format!(
                        "alias '{}' is reserved",
                        alias
                    )));
                }
                let link = self
                    .store
                    .save(target, alias)
                    .await
                    .map_err(|e| self.store_failure(alias, e))?;
                log_saved(principal, &link);
                Ok(LinkCreateResult {
                    link,
                    generated_alias: false,
                })
            }
            None => {
                let link = self.save_generated(target).await?;
                log_saved(principal, &link);
                Ok(LinkCreateResult {
                    link,
                    generated_alias: true,
                })
            }
        }
    }

    async fn save_generated(&self, target: &str) -> Result<ShortLink, ShortgateError> {
        for attempt in 1..=self.max_alias_attempts {
            let alias = generate_alias(self.alias_length);
            if is_reserved_alias(&alias) {
                debug!(attempt, alias = %alias, "generated alias is reserved");
                continue;
            }
            match self.store.save(target, &alias).await {
                Ok(link) => return Ok(link),
                Err(StoreError::AliasConflict(_)) => {
                    debug!(attempt, alias = %alias, "generated alias already taken");
                }
                Err(e) => return Err(self.store_failure(&alias, e)),
            }
        }

        error!(
            attempts = self.max_alias_attempts,
            "could not allocate a unique alias"
        );
        Err(ShortgateError::conflict("could not allocate a unique alias"))
    }

    /// Remove a mapping. Only a granted admin may delete.
    pub async fn handle_delete(
        &self,
        outcome: AuthOutcome,
        alias: &str,
    ) -> Result<(), ShortgateError> {
        let principal = match &outcome {
            AuthOutcome::Authenticated { principal, .. } if outcome.is_admin() => principal,
            AuthOutcome::Authenticated { principal, admin } => {
                info!(uid = principal.id, ?admin, alias, "delete refused: not an admin");
                return Err(ShortgateError::authorization_denied("forbidden"));
            }
            other => return Err(auth_rejection(other)),
        };

        if !is_valid_alias(alias) {
            return Err(StoreError::NotFound(alias.to_string()).into());
        }

        self.store
            .delete(alias)
            .await
            .map_err(|e| self.store_failure(alias, e))?;

        info!(uid = principal.id, alias, "Short link deleted");
        Ok(())
    }

    /// Resolve an alias to its target. No authorization.
    pub async fn handle_redirect(&self, alias: &str) -> Result<String, ShortgateError> {
        if !is_valid_alias(alias) {
            return Err(StoreError::NotFound(alias.to_string()).into());
        }

        let link = self
            .store
            .get(alias)
            .await
            .map_err(|e| self.store_failure(alias, e))?;
        Ok(link.target)
    }
}

fn log_saved(principal: &Principal, link: &ShortLink) {
    info!(
        uid = principal.id,
        alias = %link.alias,
        target = %link.target,
        "Short link created"
    );
}
