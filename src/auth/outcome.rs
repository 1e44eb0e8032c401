//! Per-request authorization result
//!
//! Produced once by [`Authorizer`](super::Authorizer) and moved into exactly
//! one handler. Never stored or cached.

/// The caller as proven by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// `uid` claim
    pub id: u64,
    pub email: Option<String>,
    /// Optional `is_admin` claim; only trusted when the token-claim gate is on
    pub token_admin: bool,
    /// Raw bearer token, forwarded to the permission authority
    pub credential: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStatus {
    /// No admin check was requested, or no gate is enabled
    Unchecked,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    InvalidToken,
    PermissionCheckFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Unauthenticated,
    Authenticated {
        principal: Principal,
        admin: AdminStatus,
    },
    Failed(AuthFailure),
}

impl AuthOutcome {
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            AuthOutcome::Authenticated {
                admin: AdminStatus::Granted,
                ..
            }
        )
    }

    /// Short label for log fields
    pub fn label(&self) -> &'static str {
        match self {
            AuthOutcome::Unauthenticated => "unauthenticated",
            AuthOutcome::Authenticated {
                admin: AdminStatus::Granted,
                ..
            } => "admin",
            AuthOutcome::Authenticated {
                admin: AdminStatus::Denied,
                ..
            } => "non_admin",
            AuthOutcome::Authenticated { .. } => "authenticated",
            AuthOutcome::Failed(AuthFailure::InvalidToken) => "invalid_token",
            AuthOutcome::Failed(AuthFailure::PermissionCheckFailed) => "permission_check_failed",
        }
    }
}
