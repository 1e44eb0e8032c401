//! Admin grant / revoke, delegated to the permission authority

use tracing::{info, warn};

use crate::auth::{FaultKind, PermissionClient, PermissionError};
use crate::errors::ShortgateError;

pub struct AdminService {
    permissions: PermissionClient,
}

impl AdminService {
    pub fn new(permissions: PermissionClient) -> Self {
        Self { permissions }
    }

    /// Make `email` an admin of `app_id` (configured app when `None`).
    pub async fn grant(
        &self,
        credential: Option<&str>,
        email: &str,
        app_id: Option<i32>,
    ) -> Result<bool, ShortgateError> {
        let (credential, email, app_id) = self.prepare(credential, email, app_id)?;

        let updated = self
            .permissions
            .set_admin(email, app_id, credential)
            .await
            .map_err(|e| map_admin_error("set_admin", e))?;

        info!(email, app_id, updated, "admin rights granted");
        Ok(updated)
    }

    pub async fn revoke(
        &self,
        credential: Option<&str>,
        email: &str,
        app_id: Option<i32>,
    ) -> Result<bool, ShortgateError> {
        let (credential, email, app_id) = self.prepare(credential, email, app_id)?;

        let updated = self
            .permissions
            .del_admin(email, app_id, credential)
            .await
            .map_err(|e| map_admin_error("del_admin", e))?;

        info!(email, app_id, updated, "admin rights revoked");
        Ok(updated)
    }

    fn prepare<'a>(
        &self,
        credential: Option<&'a str>,
        email: &'a str,
        app_id: Option<i32>,
    ) -> Result<(&'a str, &'a str, i32), ShortgateError> {
        let credential =
            credential.ok_or_else(|| ShortgateError::unauthenticated("authorization required"))?;
        // 空或带空白的 Bearer 值不转发
        if credential.is_empty() || credential.contains(char::is_whitespace) {
            return Err(ShortgateError::invalid_credential("invalid credentials"));
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(ShortgateError::validation("email is required"));
        }

        Ok((
            credential,
            email,
            app_id.unwrap_or_else(|| self.permissions.app_id()),
        ))
    }
}

/// Decide by fault kind, never by message text.
fn map_admin_error(operation: &str, err: PermissionError) -> ShortgateError {
    warn!(operation, error = %err, "admin management call failed");
    match err.fault().kind {
        FaultKind::InvalidArgument | FaultKind::Unauthenticated => {
            ShortgateError::invalid_credential("invalid credentials")
        }
        FaultKind::PermissionDenied => ShortgateError::authorization_denied("forbidden"),
        FaultKind::NotFound => ShortgateError::not_found("user not found"),
        _ => ShortgateError::permission_check_failed("permission service unavailable"),
    }
}
