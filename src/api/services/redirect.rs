use actix_web::http::header;
use actix_web::{HttpResponse, web};
use tracing::debug;

use crate::services::LinkService;

use super::helpers::error_from_shortgate;

pub struct RedirectService;

impl RedirectService {
    /// `GET /{alias}` → 302 to the stored target
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<LinkService>,
    ) -> HttpResponse {
        let alias = path.into_inner();

        match service.handle_redirect(&alias).await {
            Ok(target) => {
                debug!(alias = %alias, target = %target, "redirecting");
                HttpResponse::Found()
                    .insert_header((header::LOCATION, target))
                    .insert_header((header::CACHE_CONTROL, "no-cache"))
                    .finish()
            }
            Err(e) => error_from_shortgate(&e),
        }
    }
}
