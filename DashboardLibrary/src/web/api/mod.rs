pub mod index;
pub mod javascript;
pub mod language;
pub mod log;
pub mod media;
pub mod state;
pub mod upload;

use actix_web::web;

/// Registers every dashboard route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index::index)
        .service(upload::upload)
        .service(state::initialize())
        .service(language::initialize())
        .service(media::initialize())
        .service(javascript::initialize())
        .service(log::initialize())
        .default_service(web::route().to(index::not_found));
}
