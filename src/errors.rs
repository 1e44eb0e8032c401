use std::fmt;

use actix_web::http::StatusCode;

use crate::storage::StoreError;
use crate::utils::UrlValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortgateError {
    NotFound(String),
    Conflict(String),
    Validation(String),
    InvalidUrl(String),
    Unauthenticated(String),
    InvalidCredential(String),
    AuthorizationDenied(String),
    PermissionCheckFailed(String),
    TransientStore(String),
    Config(String),
    DatabaseConnection(String),
}

impl ShortgateError {
    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortgateError::NotFound(_) => "Resource Not Found",
            ShortgateError::Conflict(_) => "Alias Conflict",
            ShortgateError::Validation(_) => "Validation Error",
            ShortgateError::InvalidUrl(_) => "Invalid URL",
            ShortgateError::Unauthenticated(_) => "Authentication Required",
            ShortgateError::InvalidCredential(_) => "Invalid Credential",
            ShortgateError::AuthorizationDenied(_) => "Authorization Denied",
            ShortgateError::PermissionCheckFailed(_) => "Permission Check Failed",
            ShortgateError::TransientStore(_) => "Storage Unavailable",
            ShortgateError::Config(_) => "Configuration Error",
            ShortgateError::DatabaseConnection(_) => "Database Connection Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortgateError::NotFound(msg)
            | ShortgateError::Conflict(msg)
            | ShortgateError::Validation(msg)
            | ShortgateError::InvalidUrl(msg)
            | ShortgateError::Unauthenticated(msg)
            | ShortgateError::InvalidCredential(msg)
            | ShortgateError::AuthorizationDenied(msg)
            | ShortgateError::PermissionCheckFailed(msg)
            | ShortgateError::TransientStore(msg)
            | ShortgateError::Config(msg)
            | ShortgateError::DatabaseConnection(msg) => msg,
        }
    }

    /// HTTP status used when the error reaches the API layer
    pub fn http_status(&self) -> StatusCode {
        match self {
            ShortgateError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortgateError::Conflict(_) => StatusCode::CONFLICT,
            ShortgateError::Validation(_) | ShortgateError::InvalidUrl(_) => {
                StatusCode::BAD_REQUEST
            }
            ShortgateError::Unauthenticated(_) | ShortgateError::InvalidCredential(_) => {
                StatusCode::UNAUTHORIZED
            }
            // permission check failures are denials, never implicit allows
            ShortgateError::AuthorizationDenied(_) | ShortgateError::PermissionCheckFailed(_) => {
                StatusCode::FORBIDDEN
            }
            ShortgateError::TransientStore(_)
            | ShortgateError::Config(_)
            | ShortgateError::DatabaseConnection(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortgateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortgateError {}

// 便捷的构造函数
impl ShortgateError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortgateError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Conflict(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Validation(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        ShortgateError::InvalidUrl(msg.into())
    }

    pub fn unauthenticated<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Unauthenticated(msg.into())
    }

    pub fn invalid_credential<T: Into<String>>(msg: T) -> Self {
        ShortgateError::InvalidCredential(msg.into())
    }

    pub fn authorization_denied<T: Into<String>>(msg: T) -> Self {
        ShortgateError::AuthorizationDenied(msg.into())
    }

    pub fn permission_check_failed<T: Into<String>>(msg: T) -> Self {
        ShortgateError::PermissionCheckFailed(msg.into())
    }

    pub fn transient_store<T: Into<String>>(msg: T) -> Self {
        ShortgateError::TransientStore(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortgateError::Config(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortgateError::DatabaseConnection(msg.into())
    }
}

/// Store faults become user-facing kinds here; the raw detail stays in logs.
impl From<StoreError> for ShortgateError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AliasConflict(alias) => {
                ShortgateError::conflict(format!("alias '{}' already exists", alias))
            }
            StoreError::NotFound(alias) => {
                ShortgateError::not_found(format!("url by alias '{}' was not found", alias))
            }
            StoreError::Transient(_) => ShortgateError::transient_store("internal error"),
        }
    }
}

impl From<UrlValidationError> for ShortgateError {
    fn from(err: UrlValidationError) -> Self {
        ShortgateError::invalid_url(err.public_message())
    }
}

pub type Result<T> = std::result::Result<T, ShortgateError>;
