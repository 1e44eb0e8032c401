//! Target URL validation
//!
//! 只接受带主机名的 http/https 绝对地址。

use url::Url;

/// Longest target accepted, in bytes
pub const MAX_TARGET_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    Empty,
    TooLong(usize),
    Malformed(String),
    UnsupportedScheme(String),
    MissingHost,
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "URL cannot be empty"),
            Self::TooLong(len) => write!(
                f,
                "URL is {} bytes long, the limit is {}",
                len, MAX_TARGET_LENGTH
            ),
            Self::Malformed(msg) => write!(f, "Invalid URL format: {}", msg),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "Unsupported scheme '{}'. Only http and https are allowed",
                scheme
            ),
            Self::MissingHost => write!(f, "URL must contain a host"),
        }
    }
}

impl std::error::Error for UrlValidationError {}

impl UrlValidationError {
    /// Message safe to return to API callers
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Empty => "url is required",
            Self::TooLong(_) => "url is too long",
            Self::Malformed(_) | Self::MissingHost => "url is not a valid URL",
            Self::UnsupportedScheme(_) => "url must start with http:// or https://",
        }
    }
}

/// Validate a redirect target and return the parsed URL.
pub fn validate_url(raw: &str) -> Result<Url, UrlValidationError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if raw.len() > MAX_TARGET_LENGTH {
        return Err(UrlValidationError::TooLong(raw.len()));
    }

    let parsed = Url::parse(raw).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    // Url 会把 scheme 统一成小写
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(parsed)
}
