use mime_guess::from_path;
use actix_web::{get, web, HttpResponse, Scope, Responder};
use crate::utils::static_files::StaticFiles;

pub fn initialize() -> Scope {
    web::scope("/javascript")
        .service(javascript)
}

#[get("/{filename:.*\\.js}")]
async fn javascript(filename: web::Path<String>) -> impl Responder {
    let path = format!("javascript/{}", filename.into_inner());
    match StaticFiles::get(&path) {
        Some(file) => {
            let mime_type = from_path(&path).first_or_octet_stream();
            HttpResponse::Ok().content_type(mime_type.as_ref()).body(file.data.into_owned())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}
