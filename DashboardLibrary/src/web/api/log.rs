use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use actix_web::{get, web, Scope, Responder, HttpResponse};
use crate::utils::logging::*;

pub fn initialize() -> Scope {
    web::scope("/log")
        .service(system_log)
        .service(system_log_since)
}

#[get("/system_log")]
async fn system_log() -> impl Responder {
    let system_log = Logger::get_system_logs().await;
    HttpResponse::Ok().body(Logger::format_logs(&system_log))
}

#[get("/system_log/since/{since}")]
async fn system_log_since(since: web::Path<String>) -> impl Responder {
    match parse_datetime(&since.into_inner()) {
        Ok(since_time) => {
            let logs = Logger::get_system_logs_since(since_time).await;
            HttpResponse::Ok().body(Logger::format_logs(&logs))
        },
        Err(entry) => HttpResponse::BadRequest().body(entry.message),
    }
}

fn parse_datetime(datetime_str: &str) -> Result<DateTime<Local>, LogEntry> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d-%H-%M-%S")
        .ok()
        .and_then(|naive_date_time| Local.from_local_datetime(&naive_date_time).single())
        .ok_or(notice_entry!(WebEntry::InvalidDatetime))
}
