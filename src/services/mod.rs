//! Service layer for business logic

mod admin_service;
mod link_service;

pub use admin_service::AdminService;
pub use link_service::{LinkCreateResult, LinkService, SaveLinkRequest};
