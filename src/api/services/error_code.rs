//! API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::ShortgateError;

/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证与授权
/// - 3000-3099: 链接
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    InternalServerError = 1005,

    AuthRequired = 2000,
    TokenInvalid = 2002,
    Forbidden = 2003,
    PermissionCheckFailed = 2004,

    LinkNotFound = 3000,
    LinkAlreadyExists = 3001,
    LinkInvalidUrl = 3002,
    LinkDatabaseError = 3005,
}

impl From<&ShortgateError> for ErrorCode {
    fn from(err: &ShortgateError) -> Self {
        match err {
            ShortgateError::NotFound(_) => ErrorCode::LinkNotFound,
            ShortgateError::Conflict(_) => ErrorCode::LinkAlreadyExists,
            ShortgateError::Validation(_) => ErrorCode::BadRequest,
            ShortgateError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
            ShortgateError::Unauthenticated(_) => ErrorCode::AuthRequired,
            ShortgateError::InvalidCredential(_) => ErrorCode::TokenInvalid,
            ShortgateError::AuthorizationDenied(_) => ErrorCode::Forbidden,
            ShortgateError::PermissionCheckFailed(_) => ErrorCode::PermissionCheckFailed,
            ShortgateError::TransientStore(_) => ErrorCode::LinkDatabaseError,
            ShortgateError::Config(_) | ShortgateError::DatabaseConnection(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::PermissionCheckFailed).unwrap(),
            "2004"
        );
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
    }

    #[test]
    fn test_from_error() {
        assert_eq!(
            ErrorCode::from(&ShortgateError::conflict("x")),
            ErrorCode::LinkAlreadyExists
        );
        assert_eq!(
            ErrorCode::from(&ShortgateError::invalid_credential("x")),
            ErrorCode::TokenInvalid
        );
        assert_eq!(
            ErrorCode::from(&ShortgateError::transient_store("x")),
            ErrorCode::LinkDatabaseError
        );
    }
}
