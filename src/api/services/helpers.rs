//! API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error, web};
use serde::Serialize;

use crate::errors::ShortgateError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// HTTP status and ErrorCode both come from the error kind
pub fn error_from_shortgate(err: &ShortgateError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<ShortgateError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_shortgate(&e.into()),
    }
}

/// Malformed JSON bodies get the same envelope as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req: &HttpRequest| {
            let response = error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                "failed to decode request",
            );
            error::InternalError::from_response(err, response).into()
        })
}
