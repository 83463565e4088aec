//! HTTP handlers and route configuration.

mod health;
mod images;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/blogposts")
                .route("/list", web::get().to(posts::list))
                .route("", web::post().to(posts::create))
                .route("", web::put().to(posts::update))
                .route("/{id}", web::get().to(posts::get_by_id))
                .route("/{id}", web::delete().to(posts::delete))
                .route("/{id}/images", web::post().to(posts::attach_image))
                .route("/{id}/images", web::get().to(posts::list_images))
                .route(
                    "/{id}/images/{image_id}",
                    web::delete().to(posts::detach_image),
                ),
        )
        .route("/image/{id}", web::get().to(images::get_image));
}
