//! `POST /user` / `DELETE /user`: grant or revoke admin rights

use actix_web::{HttpResponse, web};

use crate::api::extractors::BearerCredential;
use crate::services::AdminService;

use super::helpers::api_result;
use super::types::{AdminBody, AdminData};

pub async fn grant_admin(
    credential: BearerCredential,
    service: web::Data<AdminService>,
    body: web::Json<AdminBody>,
) -> HttpResponse {
    let AdminBody { email, app_id } = body.into_inner();
    let result = service
        .grant(credential.0.as_deref(), &email, app_id)
        .await
        .map(|updated| AdminData {
            email: email.trim().to_string(),
            updated,
        });
    api_result(result)
}

pub async fn revoke_admin(
    credential: BearerCredential,
    service: web::Data<AdminService>,
    body: web::Json<AdminBody>,
) -> HttpResponse {
    let AdminBody { email, app_id } = body.into_inner();
    let result = service
        .revoke(credential.0.as_deref(), &email, app_id)
        .await
        .map(|updated| AdminData {
            email: email.trim().to_string(),
            updated,
        });
    api_result(result)
}
