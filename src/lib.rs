//! shortgate - URL shortener with permission-gated writes
//!
//! Redirects are public. Creating a link needs a valid bearer token;
//! deleting one additionally needs admin rights, decided by the configured
//! admin gates (token claim and/or a remote permission authority).
//!
//! # Architecture
//! - `utils`: alias generation and target URL validation
//! - `storage`: `LinkStore` trait, sea-orm and in-memory backends
//! - `auth`: token verification, permission client, authorization pipeline
//! - `services`: link operations and admin management
//! - `api`: HTTP routes, extractors and middleware
//! - `config` / `system` / `runtime`: configuration, logging, server lifecycle

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
