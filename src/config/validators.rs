//! 启动时的配置校验

use super::StaticConfig;
use crate::errors::{Result, ShortgateError};
use crate::utils::MAX_ALIAS_LENGTH;

/// Reject configurations the service cannot run safely with.
///
/// All problems are collected and reported together.
pub fn validate_config(config: &StaticConfig) -> Result<()> {
    let mut problems = Vec::new();

    if config.auth.app_secret.trim().is_empty() {
        problems.push("auth.app_secret must be set".to_string());
    }

    let gate = &config.auth.admin_gate;
    if !gate.permission_service && !gate.token_claim {
        problems.push(
            "auth.admin_gate: at least one of permission_service or token_claim must be enabled"
                .to_string(),
        );
    }

    if config.links.alias_length == 0 || config.links.alias_length > MAX_ALIAS_LENGTH {
        problems.push(format!(
            "links.alias_length must be between 1 and {}",
            MAX_ALIAS_LENGTH
        ));
    }
    if config.links.max_alias_attempts == 0 {
        problems.push("links.max_alias_attempts must be at least 1".to_string());
    }

    if config.permission.retries_count == 0 {
        problems.push("permission.retries_count must be at least 1".to_string());
    }
    if config.permission.timeout_ms == 0 {
        problems.push("permission.timeout_ms must be greater than 0".to_string());
    }
    if gate.permission_service && config.permission.address.trim().is_empty() {
        problems.push("permission.address must be set".to_string());
    }

    if !matches!(config.logging.format.as_str(), "text" | "json") {
        problems.push(format!(
            "logging.format must be 'text' or 'json', got '{}'",
            config.logging.format
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ShortgateError::config(problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> StaticConfig {
        let mut config = StaticConfig::default();
        config.auth.app_secret = "secret".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = validate_config(&StaticConfig::default()).unwrap_err();
        assert!(err.message().contains("app_secret"));
    }

    #[test]
    fn test_all_admin_gates_disabled_rejected() {
        let mut config = valid();
        config.auth.admin_gate.permission_service = false;
        config.auth.admin_gate.token_claim = false;
        let err = validate_config(&config).unwrap_err();
        assert!(err.message().contains("admin_gate"));

        config.auth.admin_gate.token_claim = true;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_limits_rejected_together() {
        let mut config = valid();
        config.links.alias_length = 0;
        config.links.max_alias_attempts = 0;
        config.permission.retries_count = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.message().contains("alias_length"));
        assert!(err.message().contains("max_alias_attempts"));
        assert!(err.message().contains("retries_count"));
    }
}
