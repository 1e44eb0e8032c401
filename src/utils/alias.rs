//! Alias codec
//!
//! 生成短链接别名。字符集为 URL 安全的 base64 字母表，
//! 每个字符独立地从线程本地 CSPRNG 中抽取。

/// URL-safe base64 alphabet (RFC 4648 §5)
pub const ALIAS_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Longest alias accepted from callers
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Generate a random alias of exactly `length` characters.
///
/// Uniqueness is not checked here; the link store rejects duplicates and
/// the link service regenerates on conflict.
pub fn generate_alias(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| ALIAS_ALPHABET[rand::random_range(0..ALIAS_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Check a caller-supplied alias: 1..=64 characters from [`ALIAS_ALPHABET`]
pub fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias.len() <= MAX_ALIAS_LENGTH
        && alias.bytes().all(|b| ALIAS_ALPHABET.contains(&b))
}

/// Top-level route segments. `GET /url` would never reach the redirect
/// route, so these are never stored as aliases.
pub const RESERVED_ALIASES: &[&str] = &["url", "user"];

pub fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}
