//! Authorization extractors
//!
//! Handlers receive the [`AuthOutcome`] by value. The extractor runs the
//! pipeline before the handler body, and the outcome is never stored on the
//! request.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::auth::{AdminCheck, AuthOutcome, Authorizer, extract_bearer};

fn bearer_credential(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok();
    extract_bearer(header).map(str::to_owned)
}

fn authorize_request(
    req: &HttpRequest,
    check: AdminCheck,
) -> LocalBoxFuture<'static, Result<AuthOutcome, actix_web::Error>> {
    let authorizer = req.app_data::<web::Data<Authorizer>>().cloned();
    let credential = bearer_credential(req);

    Box::pin(async move {
        let authorizer = authorizer.ok_or_else(|| {
            actix_web::error::ErrorInternalServerError("authorizer is not registered")
        })?;
        let outcome = authorizer.authorize(credential.as_deref(), check).await;
        debug!(outcome = outcome.label(), ?check, "request authorized");
        Ok(outcome)
    })
}

/// Token verified; admin status not consulted
pub struct Authenticated(pub AuthOutcome);

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let fut = authorize_request(req, AdminCheck::Skip);
        Box::pin(async move { fut.await.map(Authenticated) })
    }
}

/// Token verified and admin gates evaluated
pub struct AdminAuthenticated(pub AuthOutcome);

impl FromRequest for AdminAuthenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let fut = authorize_request(req, AdminCheck::Required);
        Box::pin(async move { fut.await.map(AdminAuthenticated) })
    }
}

/// Raw bearer token for forwarding, without local verification
pub struct BearerCredential(pub Option<String>);

impl FromRequest for BearerCredential {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(BearerCredential(bearer_credential(req))))
    }
}
