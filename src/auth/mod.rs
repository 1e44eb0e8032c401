//! Request authorization
//!
//! Token verification is local; admin decisions may call out to the
//! permission authority.

mod outcome;
pub mod permission;
pub mod pipeline;
pub mod token;

pub use outcome::{AdminStatus, AuthFailure, AuthOutcome, Principal};
pub use permission::{
    FaultKind, GrpcPermissionAuthority, PermissionAuthority, PermissionClient, PermissionError,
    RemoteFault, RetryBudget,
};
pub use pipeline::{AdminCheck, AdminGatePolicy, Authorizer};
pub use token::{Claims, TokenError, TokenVerifier, extract_bearer};
