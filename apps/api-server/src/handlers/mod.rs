//! HTTP handlers and route configuration.

mod convert;
mod health;
mod posts;
mod profiles;
mod transactions;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Read model
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}/comments", web::get().to(posts::list_comments)),
            )
            .service(
                web::scope("/profiles")
                    .route("", web::get().to(profiles::list_profiles))
                    .route("/{address}", web::get().to(profiles::get_profile)),
            )
            // Write path
            .route("/tx/{entry_point}", web::post().to(transactions::build_transaction)),
    );
}
