pub mod extractors;
pub mod middleware;
pub mod services;
