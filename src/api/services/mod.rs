//! HTTP routes

mod admins;
pub mod error_code;
pub mod helpers;
mod links;
mod redirect;
pub mod types;

use actix_web::web;

pub use error_code::ErrorCode;
pub use redirect::RedirectService;
pub use types::ApiResponse;

/// Register every route. Shared state (`LinkService`, `AdminService`,
/// `Authorizer`) is expected as `web::Data` on the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(helpers::json_config())
        .service(
            web::resource("/url")
                .route(web::post().to(links::save_url)),
        )
        .service(
            web::resource("/url/{alias}")
                .route(web::delete().to(links::delete_url)),
        )
        .service(
            web::resource("/user")
                .route(web::post().to(admins::grant_admin))
                .route(web::delete().to(admins::revoke_admin)),
        )
        .service(
            web::resource("/{alias}")
                .route(web::get().to(RedirectService::handle_redirect)),
        );
}
