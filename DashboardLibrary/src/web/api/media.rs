use actix_files::NamedFile;
use actix_web::{get, web, HttpRequest, HttpResponse, Scope};
use crate::dashboard::file_manager::FileManager;

pub fn initialize() -> Scope {
    web::scope("/media")
        .service(results)
        .service(uploads)
}

#[get("/results/{filename}")]
async fn results(req: HttpRequest, filename: web::Path<String>, files: web::Data<FileManager>) -> HttpResponse {
    match files.result_path(&filename.into_inner()) {
        Some(path) => serve(&req, path).await,
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

#[get("/uploads/{filename}")]
async fn uploads(req: HttpRequest, filename: web::Path<String>, files: web::Data<FileManager>) -> HttpResponse {
    match files.upload_path(&filename.into_inner()) {
        Some(path) => serve(&req, path).await,
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

async fn serve(req: &HttpRequest, path: std::path::PathBuf) -> HttpResponse {
    match NamedFile::open_async(path).await {
        Ok(file) => file.into_response(req),
        Err(_) => HttpResponse::NotFound().body("Not Found"),
    }
}
