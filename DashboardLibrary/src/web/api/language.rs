use std::str::FromStr;
use actix_web::http::header;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder, Scope};
use crate::utils::logging::*;
use crate::dashboard::session_store::SessionStore;
use crate::dashboard::utils::language::Language;
use crate::web::utils::response::OperationStatus;
use crate::web::utils::session::{session_cookie, session_id};

pub fn initialize() -> Scope {
    web::scope("/language")
        .service(set_language)
}

#[get("/{lang}")]
async fn set_language(req: HttpRequest, lang: web::Path<String>, sessions: web::Data<SessionStore>) -> impl Responder {
    let lang = lang.into_inner();
    let language = match Language::from_str(&lang) {
        Ok(language) => language,
        Err(_) => {
            let entry = notice_entry!(WebEntry::UnknownLanguage(lang));
            return HttpResponse::BadRequest().json(OperationStatus::failure(entry.message));
        }
    };
    let (session_id, _) = sessions.touch(session_id(&req)).await;
    sessions.set_language(session_id, language).await;
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(session_cookie(session_id, sessions.lifetime()))
        .finish()
}
