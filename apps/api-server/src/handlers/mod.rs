//! HTTP handlers and route configuration.

mod events;
mod health;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("", web::post().to(posts::create_post))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::patch().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        )
        .service(
            web::scope("/users")
                .route("/signup", web::post().to(users::signup))
                .route("/login", web::post().to(users::login)),
        )
        .service(
            web::scope("/events")
                .route("", web::get().to(events::list_events))
                .route("", web::post().to(events::record_event)),
        )
        .route("/graphql", web::post().to(crate::graphql::graphql_handler));
}
