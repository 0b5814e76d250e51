use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;
use futures::TryStreamExt;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use crate::utils::logging::*;
use crate::dashboard::annotation_pipeline::{Annotation, AnnotationPipeline, FallbackReason};
use crate::dashboard::file_manager::FileManager;
use crate::dashboard::session_store::SessionStore;
use crate::web::utils::response::OperationStatus;
use crate::web::utils::session::{session_cookie, session_id};

#[post("/upload")]
async fn upload(req: HttpRequest, mut payload: Multipart, files: web::Data<FileManager>, pipeline: web::Data<AnnotationPipeline>, sessions: web::Data<SessionStore>) -> impl Responder {
    let (session_id, _) = sessions.touch(session_id(&req)).await;
    let mut upload_path = None;
    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                let entry = notice_entry!(WebEntry::InvalidPayload, err.to_string());
                return HttpResponse::BadRequest().json(OperationStatus::failure(entry.message));
            }
        };
        let content_disposition = match field.content_disposition() {
            Some(content_disposition) => content_disposition.clone(),
            None => return HttpResponse::BadRequest().json(OperationStatus::failure(WebEntry::InvalidPayload)),
        };
        if content_disposition.get_name() != Some("file") {
            continue;
        }
        let file_name = match content_disposition.get_filename().and_then(FileManager::sanitize_file_name) {
            Some(file_name) => file_name,
            None => return redirect_home(session_id, &sessions),
        };
        if !FileManager::is_supported(&file_name) {
            let entry = notice_entry!(WebEntry::UnsupportedFileType(file_name));
            return HttpResponse::BadRequest().json(OperationStatus::failure(entry.message));
        }
        match files.save_field(&mut field, &file_name).await {
            Ok(file_path) => {
                upload_path = Some(file_path);
                break;
            }
            Err(entry) => return internal_error(entry).await,
        }
    }
    let upload_path = match upload_path {
        Some(upload_path) => upload_path,
        None => return redirect_home(session_id, &sessions),
    };
    match annotate(pipeline.into_inner(), upload_path).await {
        Ok(reference) => {
            sessions.set_last_result(session_id, reference).await;
            redirect_home(session_id, &sessions)
        }
        Err(entry) => internal_error(entry).await,
    }
}

async fn annotate(pipeline: Arc<AnnotationPipeline>, upload_path: PathBuf) -> Result<String, LogEntry> {
    let annotation = tokio::task::spawn_blocking(move || pipeline.annotate(&upload_path)).await
        .map_err(|err| error_entry!(SystemEntry::TaskPanickedError(err)))??;
    match &annotation {
        Annotation::Annotated { file_name, water_hyacinth, trash } => {
            logging_information!(DetectionEntry::Annotated(file_name.clone(), *water_hyacinth, *trash));
        }
        Annotation::Fallback { reason: FallbackReason::ImageDecodeFailure(message), .. } => {
            logging_notice!(message.as_str());
        }
        Annotation::Fallback { reason: FallbackReason::DetectorFailure(message), .. } => {
            logging_error!(message.as_str());
        }
        Annotation::Fallback { reason: FallbackReason::ModelsUnavailable, .. } => {}
    }
    Ok(annotation.into_reference())
}

fn redirect_home(session_id: Uuid, sessions: &SessionStore) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(session_cookie(session_id, sessions.lifetime()))
        .finish()
}

async fn internal_error(entry: LogEntry) -> HttpResponse {
    let message = entry.message.clone();
    logging_entry!(entry);
    HttpResponse::InternalServerError().json(OperationStatus::failure(message))
}
