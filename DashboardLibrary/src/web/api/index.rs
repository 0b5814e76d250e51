use actix_web::{get, HttpResponse, Responder};
use crate::utils::logging::*;
use crate::utils::static_files::StaticFiles;

#[get("/")]
pub async fn index() -> impl Responder {
    match StaticFiles::get("html/index.html") {
        Some(index) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(index.data.into_owned()),
        None => {
            logging_error!(WebEntry::StaticFileNotFound("html/index.html".to_string()));
            HttpResponse::NotFound().body("404 Not Found")
        }
    }
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().body("404 Not Found")
}
