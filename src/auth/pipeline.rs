//! Authorization pipeline
//!
//! credential → token verification → (optional) admin gates → [`AuthOutcome`]

use tracing::{debug, warn};

use super::permission::PermissionClient;
use super::token::TokenVerifier;
use super::{AdminStatus, AuthFailure, AuthOutcome, Principal};
use crate::config::AdminGateConfig;

/// Whether the route needs an admin decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCheck {
    Skip,
    Required,
}

/// Enabled admin gates. Every enabled gate must grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminGatePolicy {
    pub permission_service: bool,
    pub token_claim: bool,
}

impl AdminGatePolicy {
    pub fn none_enabled(&self) -> bool {
        !self.permission_service && !self.token_claim
    }
}

impl From<&AdminGateConfig> for AdminGatePolicy {
    fn from(config: &AdminGateConfig) -> Self {
        Self {
            permission_service: config.permission_service,
            token_claim: config.token_claim,
        }
    }
}

impl Default for AdminGatePolicy {
    fn default() -> Self {
        Self::from(&AdminGateConfig::default())
    }
}

pub struct Authorizer {
    verifier: TokenVerifier,
    permissions: PermissionClient,
    gates: AdminGatePolicy,
}

impl Authorizer {
    pub fn new(verifier: TokenVerifier, permissions: PermissionClient, gates: AdminGatePolicy) -> Self {
        Self {
            verifier,
            permissions,
            gates,
        }
    }

    pub async fn authorize(&self, credential: Option<&str>, check: AdminCheck) -> AuthOutcome {
        let Some(credential) = credential else {
            return AuthOutcome::Unauthenticated;
        };

        let principal = match self.verifier.verify(credential) {
            Ok(principal) => principal,
            Err(e) => {
                warn!(error = %e, "bearer token rejected");
                return AuthOutcome::Failed(AuthFailure::InvalidToken);
            }
        };

        let admin = match check {
            AdminCheck::Skip => AdminStatus::Unchecked,
            AdminCheck::Required => match self.admin_status(&principal).await {
                Ok(status) => status,
                Err(failure) => return AuthOutcome::Failed(failure),
            },
        };

        debug!(uid = principal.id, ?admin, "caller authenticated");
        AuthOutcome::Authenticated { principal, admin }
    }

    /// Local gate first so an explicit denial never costs a remote call.
    async fn admin_status(&self, principal: &Principal) -> Result<AdminStatus, AuthFailure> {
        if self.gates.none_enabled() {
            return Ok(AdminStatus::Unchecked);
        }

        if self.gates.token_claim && !principal.token_admin {
            return Ok(AdminStatus::Denied);
        }

        if self.gates.permission_service {
            match self.permissions.is_admin(principal).await {
                Ok(true) => {}
                Ok(false) => return Ok(AdminStatus::Denied),
                Err(e) => {
                    warn!(uid = principal.id, error = %e, "admin check failed");
                    return Err(AuthFailure::PermissionCheckFailed);
                }
            }
        }

        Ok(AdminStatus::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::permission::{FaultKind, PermissionAuthority, RemoteFault, RetryBudget};
    use crate::auth::token::Claims;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    const SECRET: &str = "pipeline_test_secret";

    struct FixedAuthority {
        calls: AtomicU32,
        answer: Result<bool, FaultKind>,
    }

    #[async_trait]
    impl PermissionAuthority for FixedAuthority {
        async fn is_admin(&self, _: u64, _: i32, _: &str) -> Result<bool, RemoteFault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.map_err(|kind| RemoteFault::new(kind, "fixed"))
        }

        async fn set_admin(&self, _: &str, _: i32, _: &str) -> Result<bool, RemoteFault> {
            unreachable!()
        }

        async fn del_admin(&self, _: &str, _: i32, _: &str) -> Result<bool, RemoteFault> {
            unreachable!()
        }
    }

    fn authorizer(answer: Result<bool, FaultKind>, gates: AdminGatePolicy) -> (Authorizer, Arc<FixedAuthority>) {
        let authority = Arc::new(FixedAuthority {
            calls: AtomicU32::new(0),
            answer,
        });
        let client = PermissionClient::new(
            authority.clone(),
            RetryBudget::new(3, Duration::from_millis(100)),
            1,
        );
        (
            Authorizer::new(TokenVerifier::new(SECRET), client, gates),
            authority,
        )
    }

    fn token(uid: u64, is_admin: bool) -> String {
        let mut claims = Claims::new(uid, 600);
        claims.is_admin = is_admin;
        TokenVerifier::new(SECRET).issue(&claims).unwrap()
    }

    #[tokio::test]
    async fn test_no_credential_is_unauthenticated() {
        let (auth, authority) = authorizer(Ok(true), AdminGatePolicy::default());
        let outcome = auth.authorize(None, AdminCheck::Required).await;
        assert_eq!(outcome, AuthOutcome::Unauthenticated);
        assert_eq!(authority.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bad_token_never_reaches_authority() {
        let (auth, authority) = authorizer(Ok(true), AdminGatePolicy::default());
        let forged = TokenVerifier::new("wrong").issue(&Claims::new(1, 600)).unwrap();

        let outcome = auth.authorize(Some(&forged), AdminCheck::Required).await;
        assert_eq!(outcome, AuthOutcome::Failed(AuthFailure::InvalidToken));
        assert_eq!(authority.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_skip_leaves_admin_unchecked() {
        let (auth, authority) = authorizer(Ok(true), AdminGatePolicy::default());
        let outcome = auth.authorize(Some(&token(5, false)), AdminCheck::Skip).await;

        assert!(matches!(
            outcome,
            AuthOutcome::Authenticated {
                admin: AdminStatus::Unchecked,
                ref principal
            } if principal.id == 5
        ));
        assert_eq!(authority.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_permission_service_gate() {
        let (auth, _) = authorizer(Ok(true), AdminGatePolicy::default());
        assert!(auth.authorize(Some(&token(1, false)), AdminCheck::Required).await.is_admin());

        let (auth, _) = authorizer(Ok(false), AdminGatePolicy::default());
        let outcome = auth.authorize(Some(&token(1, false)), AdminCheck::Required).await;
        assert_eq!(outcome.label(), "non_admin");
    }

    #[tokio::test]
    async fn test_authority_failure_fails_closed() {
        let (auth, authority) = authorizer(Err(FaultKind::Aborted), AdminGatePolicy::default());
        let outcome = auth.authorize(Some(&token(1, true)), AdminCheck::Required).await;

        assert_eq!(outcome, AuthOutcome::Failed(AuthFailure::PermissionCheckFailed));
        assert_eq!(authority.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_token_claim_gate_alone() {
        let gates = AdminGatePolicy {
            permission_service: false,
            token_claim: true,
        };
        let (auth, authority) = authorizer(Ok(true), gates);

        assert!(auth.authorize(Some(&token(1, true)), AdminCheck::Required).await.is_admin());
        assert!(!auth.authorize(Some(&token(1, false)), AdminCheck::Required).await.is_admin());
        assert_eq!(authority.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_both_gates_must_grant() {
        let gates = AdminGatePolicy {
            permission_service: true,
            token_claim: true,
        };
        let (auth, authority) = authorizer(Ok(true), gates);

        // claim 拒绝时不再调用远端
        let outcome = auth.authorize(Some(&token(1, false)), AdminCheck::Required).await;
        assert_eq!(outcome.label(), "non_admin");
        assert_eq!(authority.calls.load(Ordering::SeqCst), 0);

        assert!(auth.authorize(Some(&token(1, true)), AdminCheck::Required).await.is_admin());
        assert_eq!(authority.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_gate_leaves_unchecked() {
        let gates = AdminGatePolicy {
            permission_service: false,
            token_claim: false,
        };
        let (auth, _) = authorizer(Ok(true), gates);
        let outcome = auth.authorize(Some(&token(1, true)), AdminCheck::Required).await;
        assert_eq!(outcome.label(), "authenticated");
        assert!(!outcome.is_admin());
    }
}
