//! Application lifecycle

pub mod server;
pub mod startup;

pub use server::run_server;
pub use startup::{StartupContext, prepare_server_startup};
