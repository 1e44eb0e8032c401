mod r#impl;
mod structs;
pub mod validators;

pub use r#impl::init_config;
pub use structs::*;
pub use validators::validate_config;
