//! Permission authority client with bounded retry
//!
//! Every remote call goes through [`PermissionClient::call`]: strictly
//! sequential attempts, a hard timeout on each one, and a closed set of
//! retryable fault kinds. There is no sleep between attempts, so a call
//! takes at most `max_attempts × per_attempt_timeout`.

pub mod grpc;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use strum::{AsRefStr, Display};
use tracing::{debug, warn};

use super::Principal;
use crate::config::PermissionConfig;

pub use grpc::GrpcPermissionAuthority;

/// Classified remote failure, mirrored from gRPC status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FaultKind {
    NotFound,
    Aborted,
    DeadlineExceeded,
    Unavailable,
    InvalidArgument,
    Unauthenticated,
    PermissionDenied,
    Internal,
    Other,
}

impl FaultKind {
    /// Only these are retried. Everything else fails the call at once.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            FaultKind::NotFound | FaultKind::Aborted | FaultKind::DeadlineExceeded
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFault {
    pub kind: FaultKind,
    pub message: String,
}

impl RemoteFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for RemoteFault {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// Every attempt failed with a retryable fault
    Exhausted { attempts: u32, last: RemoteFault },
    /// A non-retryable fault ended the call
    Rejected(RemoteFault),
}

impl PermissionError {
    pub fn fault(&self) -> &RemoteFault {
        match self {
            PermissionError::Exhausted { last, .. } => last,
            PermissionError::Rejected(fault) => fault,
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::Exhausted { attempts, last } => {
                write!(f, "gave up after {} attempts: {}", attempts, last)
            }
            PermissionError::Rejected(fault) => write!(f, "rejected: {}", fault),
        }
    }
}

impl std::error::Error for PermissionError {}

/// Attempt bound and per-attempt timeout, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    pub max_attempts: u32,
    pub per_attempt_timeout: Duration,
}

impl RetryBudget {
    pub fn new(max_attempts: u32, per_attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            per_attempt_timeout,
        }
    }

    pub fn from_config(config: &PermissionConfig) -> Self {
        Self::new(
            config.retries_count,
            Duration::from_millis(config.timeout_ms),
        )
    }

    /// A zero budget still makes one attempt.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Raw, single-shot calls to the permission authority
///
/// `credential` is the caller's bearer token, forwarded as call metadata.
#[async_trait]
pub trait PermissionAuthority: Send + Sync {
    async fn is_admin(&self, user_id: u64, app_id: i32, credential: &str)
    -> Result<bool, RemoteFault>;

    async fn set_admin(&self, email: &str, app_id: i32, credential: &str)
    -> Result<bool, RemoteFault>;

    async fn del_admin(&self, email: &str, app_id: i32, credential: &str)
    -> Result<bool, RemoteFault>;
}

#[derive(Clone)]
pub struct PermissionClient {
    authority: Arc<dyn PermissionAuthority>,
    budget: RetryBudget,
    app_id: i32,
}

impl PermissionClient {
    pub fn new(authority: Arc<dyn PermissionAuthority>, budget: RetryBudget, app_id: i32) -> Self {
        Self {
            authority,
            budget,
            app_id,
        }
    }

    pub fn app_id(&self) -> i32 {
        self.app_id
    }

    pub async fn is_admin(&self, principal: &Principal) -> Result<bool, PermissionError> {
        self.call("is_admin", || {
            self.authority
                .is_admin(principal.id, self.app_id, &principal.credential)
        })
        .await
    }

    pub async fn set_admin(
        &self,
        email: &str,
        app_id: i32,
        credential: &str,
    ) -> Result<bool, PermissionError> {
        self.call("set_admin", || {
            self.authority.set_admin(email, app_id, credential)
        })
        .await
    }

    pub async fn del_admin(
        &self,
        email: &str,
        app_id: i32,
        credential: &str,
    ) -> Result<bool, PermissionError> {
        self.call("del_admin", || {
            self.authority.del_admin(email, app_id, credential)
        })
        .await
    }

    async fn call<T, F, Fut>(&self, operation: &'static str, mut attempt_fn: F) -> Result<T, PermissionError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteFault>>,
    {
        let max_attempts = self.budget.attempts();
        let timeout = self.budget.per_attempt_timeout;
        let mut attempt = 0;

        loop {
            attempt += 1;

            // 超时后 future 被丢弃，等价于取消本次调用
            let fault = match tokio::time::timeout(timeout, attempt_fn()).await {
                Ok(Ok(value)) => {
                    debug!(operation, attempt, max_attempts, "permission call succeeded");
                    return Ok(value);
                }
                Ok(Err(fault)) => fault,
                Err(_) => RemoteFault::new(
                    FaultKind::DeadlineExceeded,
                    format!("no response within {} ms", timeout.as_millis()),
                ),
            };

            if !fault.kind.is_retryable() {
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    fault = %fault.kind,
                    error = %fault.message,
                    "permission call rejected"
                );
                return Err(PermissionError::Rejected(fault));
            }

            warn!(
                operation,
                attempt,
                max_attempts,
                fault = %fault.kind,
                error = %fault.message,
                "permission call attempt failed"
            );

            if attempt >= max_attempts {
                return Err(PermissionError::Exhausted {
                    attempts: attempt,
                    last: fault,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with `fault` for the first `failures` calls, then answers `answer`.
    struct ScriptedAuthority {
        calls: AtomicU32,
        failures: u32,
        fault: FaultKind,
        answer: bool,
        delay: Option<Duration>,
    }

    impl ScriptedAuthority {
        fn new(failures: u32, fault: FaultKind, answer: bool) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures,
                fault,
                answer,
                delay: None,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        async fn respond(&self) -> Result<bool, RemoteFault> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                return Err(RemoteFault::new(self.fault, "scripted"));
            }
            Ok(self.answer)
        }
    }

    #[async_trait]
    impl PermissionAuthority for ScriptedAuthority {
        async fn is_admin(&self, _: u64, _: i32, _: &str) -> Result<bool, RemoteFault> {
            self.respond().await
        }

        async fn set_admin(&self, _: &str, _: i32, _: &str) -> Result<bool, RemoteFault> {
            self.respond().await
        }

        async fn del_admin(&self, _: &str, _: i32, _: &str) -> Result<bool, RemoteFault> {
            self.respond().await
        }
    }

    fn principal() -> Principal {
        Principal {
            id: 7,
            email: None,
            token_admin: false,
            credential: "tok".into(),
        }
    }

    fn client(authority: Arc<ScriptedAuthority>, max_attempts: u32) -> PermissionClient {
        PermissionClient::new(
            authority,
            RetryBudget::new(max_attempts, Duration::from_millis(200)),
            1,
        )
    }

    #[tokio::test]
    async fn test_succeeds_on_last_allowed_attempt() {
        let authority = Arc::new(ScriptedAuthority::new(2, FaultKind::Aborted, true));
        let result = client(authority.clone(), 3).is_admin(&principal()).await;

        assert_eq!(result, Ok(true));
        assert_eq!(authority.calls(), 3);
    }

    #[tokio::test]
    async fn test_exhausts_budget_on_retryable_faults() {
        let authority = Arc::new(ScriptedAuthority::new(10, FaultKind::NotFound, true));
        let result = client(authority.clone(), 3).is_admin(&principal()).await;

        match result {
            Err(PermissionError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert_eq!(last.kind, FaultKind::NotFound);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(authority.calls(), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_fault_stops_immediately() {
        let authority = Arc::new(ScriptedAuthority::new(10, FaultKind::Unavailable, true));
        let result = client(authority.clone(), 5).is_admin(&principal()).await;

        assert!(matches!(result, Err(PermissionError::Rejected(ref f)) if f.kind == FaultKind::Unavailable));
        assert_eq!(authority.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_budget_makes_one_attempt() {
        let authority = Arc::new(ScriptedAuthority::new(10, FaultKind::Aborted, true));
        let result = client(authority.clone(), 0).is_admin(&principal()).await;

        assert!(matches!(
            result,
            Err(PermissionError::Exhausted { attempts: 1, .. })
        ));
        assert_eq!(authority.calls(), 1);
    }

    #[tokio::test]
    async fn test_slow_attempt_counts_as_deadline_exceeded() {
        let mut scripted = ScriptedAuthority::new(1, FaultKind::Internal, false);
        scripted.delay = Some(Duration::from_millis(500));
        let authority = Arc::new(scripted);
        let client = PermissionClient::new(
            authority.clone(),
            RetryBudget::new(2, Duration::from_millis(20)),
            1,
        );

        // 第一次超时（可重试），第二次成功
        let result = client.is_admin(&principal()).await;
        assert_eq!(result, Ok(false));
        assert_eq!(authority.calls(), 2);
    }

    #[tokio::test]
    async fn test_set_and_del_admin_share_retry_loop() {
        let authority = Arc::new(ScriptedAuthority::new(1, FaultKind::DeadlineExceeded, true));
        let client = client(authority.clone(), 2);

        assert_eq!(client.set_admin("a@b.c", 1, "tok").await, Ok(true));
        assert_eq!(client.del_admin("a@b.c", 1, "tok").await, Ok(true));
        assert_eq!(authority.calls(), 3);
    }

    #[test]
    fn test_retryable_set_is_closed() {
        assert!(FaultKind::NotFound.is_retryable());
        assert!(FaultKind::Aborted.is_retryable());
        assert!(FaultKind::DeadlineExceeded.is_retryable());
        assert!(!FaultKind::Unavailable.is_retryable());
        assert!(!FaultKind::InvalidArgument.is_retryable());
        assert!(!FaultKind::Internal.is_retryable());
        assert_eq!(FaultKind::DeadlineExceeded.to_string(), "deadline_exceeded");
    }
}
