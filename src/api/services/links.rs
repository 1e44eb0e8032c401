//! `POST /url` and `DELETE /url/{alias}`

use actix_web::{HttpResponse, web};

use crate::api::extractors::{AdminAuthenticated, Authenticated};
use crate::services::{LinkService, SaveLinkRequest};

use super::helpers::{api_result, error_from_shortgate, success_response};
use super::types::{DeleteUrlData, SaveUrlBody, SaveUrlData};

pub async fn save_url(
    auth: Authenticated,
    service: web::Data<LinkService>,
    body: web::Json<SaveUrlBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let request = SaveLinkRequest {
        target: body.url,
        alias: body.alias,
    };

    let result = service
        .handle_save(auth.0, request)
        .await
        .map(|created| SaveUrlData {
            alias: created.link.alias,
        });
    api_result(result)
}

pub async fn delete_url(
    auth: AdminAuthenticated,
    service: web::Data<LinkService>,
    path: web::Path<String>,
) -> HttpResponse {
    let alias = path.into_inner();

    match service.handle_delete(auth.0, &alias).await {
        Ok(()) => success_response(DeleteUrlData { alias }),
        Err(e) => error_from_shortgate(&e),
    }
}
