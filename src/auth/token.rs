//! Local bearer-token verification (HS256)

use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::Principal;

/// Claims issued by the SSO service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub uid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i32>,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: u64,
}

impl Claims {
    /// Claims for `uid` expiring `ttl_secs` from now
    pub fn new(uid: u64, ttl_secs: u64) -> Self {
        Self {
            uid,
            email: None,
            app_id: None,
            is_admin: false,
            exp: jsonwebtoken::get_current_timestamp() + ttl_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Malformed,
    BadSignature,
    Expired,
    /// Required claim absent or of the wrong type
    InvalidClaims(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "malformed token"),
            TokenError::BadSignature => write!(f, "signature mismatch"),
            TokenError::Expired => write!(f, "token expired"),
            TokenError::InvalidClaims(detail) => write!(f, "invalid claims: {}", detail),
        }
    }
}

impl std::error::Error for TokenError {}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::MissingRequiredClaim(claim) => {
                TokenError::InvalidClaims(format!("missing '{}'", claim))
            }
            ErrorKind::Json(e) => TokenError::InvalidClaims(e.to_string()),
            _ => TokenError::Malformed,
        }
    }
}

/// Verifies tokens against the shared app secret. No network I/O.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, credential: &str) -> Result<Principal, TokenError> {
        let data = decode::<Claims>(credential, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        Ok(Principal {
            id: claims.uid,
            email: claims.email,
            token_admin: claims.is_admin,
            credential: credential.to_string(),
        })
    }

    /// Sign claims with the same secret. Used by tooling and tests.
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(Into::into)
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` value.
///
/// A missing header or another scheme means no credential. Once the
/// `Bearer` scheme is present the token is returned as is, even when empty
/// or malformed, so verification rejects it instead of treating the caller
/// as anonymous.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let header = header?;
    // 末尾空格可能已被 HTTP 解析器去掉
    if header == "Bearer" {
        return Some("");
    }
    header.strip_prefix("Bearer ").map(str::trim)
}
