pub mod alias;
pub mod url_validator;

pub use alias::{
    ALIAS_ALPHABET, MAX_ALIAS_LENGTH, RESERVED_ALIASES, generate_alias, is_reserved_alias,
    is_valid_alias,
};
pub use url_validator::{UrlValidationError, validate_url};
