//! Component wiring

use std::sync::Arc;

use actix_web::web;
use anyhow::{Context, Result};
use tracing::info;

use crate::api::services::configure_routes;
use crate::auth::{
    AdminGatePolicy, Authorizer, GrpcPermissionAuthority, PermissionAuthority, PermissionClient,
    RetryBudget, TokenVerifier,
};
use crate::config::StaticConfig;
use crate::services::{AdminService, LinkService};
use crate::storage::{LinkStore, StorageFactory};

/// Shared, read-only state handed to every worker
#[derive(Clone)]
pub struct StartupContext {
    pub link_service: Arc<LinkService>,
    pub authorizer: Arc<Authorizer>,
    pub admin_service: Arc<AdminService>,
}

impl StartupContext {
    /// Wire services around an already built store and authority.
    pub fn assemble(
        config: &StaticConfig,
        store: Arc<dyn LinkStore>,
        authority: Arc<dyn PermissionAuthority>,
    ) -> Self {
        let budget = RetryBudget::from_config(&config.permission);
        let permissions = PermissionClient::new(authority, budget, config.permission.app_id);

        let authorizer = Authorizer::new(
            TokenVerifier::new(&config.auth.app_secret),
            permissions.clone(),
            AdminGatePolicy::from(&config.auth.admin_gate),
        );

        Self {
            link_service: Arc::new(LinkService::new(store, &config.links)),
            authorizer: Arc::new(authorizer),
            admin_service: Arc::new(AdminService::new(permissions)),
        }
    }

    /// Register shared state and routes on an actix app.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.link_service.clone()))
            .app_data(web::Data::from(self.authorizer.clone()))
            .app_data(web::Data::from(self.admin_service.clone()));
        configure_routes(cfg);
    }
}

/// Build the production store and gRPC authority from configuration.
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();

    let store = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", store.backend_name());

    let authority = GrpcPermissionAuthority::connect_lazy(&config.permission.address)
        .context("Failed to configure permission authority client")?;

    let budget = RetryBudget::from_config(&config.permission);
    info!(
        max_attempts = budget.attempts(),
        per_attempt_timeout_ms = budget.per_attempt_timeout.as_millis() as u64,
        permission_gate = config.auth.admin_gate.permission_service,
        token_claim_gate = config.auth.admin_gate.token_claim,
        "Authorization pipeline configured"
    );

    let context = StartupContext::assemble(config, store, Arc::new(authority));
    info!("Startup completed in {:?}", start_time.elapsed());
    Ok(context)
}
