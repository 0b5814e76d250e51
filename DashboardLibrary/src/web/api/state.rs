use std::path::Path;
use serde::Serialize;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder, Scope};
use crate::dashboard::session_store::SessionStore;
use crate::dashboard::status_board::StatusBoard;
use crate::dashboard::utils::device_status::DeviceStatus;
use crate::dashboard::utils::language::{Language, Translation};
use crate::web::utils::session::{session_cookie, session_id};

#[derive(Serialize)]
struct DashboardState {
    language: Language,
    translation: Translation,
    image_url: Option<String>,
    status: DeviceStatus,
}

pub fn initialize() -> Scope {
    web::scope("/dashboard")
        .service(state)
}

#[get("/state")]
async fn state(req: HttpRequest, sessions: web::Data<SessionStore>, status_board: web::Data<StatusBoard>) -> impl Responder {
    let (session_id, session) = sessions.touch(session_id(&req)).await;
    let state = DashboardState {
        language: session.language,
        translation: session.language.translation(),
        image_url: session.last_result.as_deref().and_then(display_url),
        status: status_board.snapshot(),
    };
    HttpResponse::Ok()
        .cookie(session_cookie(session_id, sessions.lifetime()))
        .json(state)
}

/// Maps a pipeline reference to the URL it is served from.
///
/// A bare file name is an annotated result. A path is an upload the
/// pipeline left untouched.
pub fn display_url(reference: &str) -> Option<String> {
    let path = Path::new(reference);
    let file_name = path.file_name()?.to_str()?;
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Some(format!("/media/uploads/{file_name}")),
        _ => Some(format!("/media/results/{file_name}")),
    }
}
