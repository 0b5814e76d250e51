mod common;

use std::sync::Arc;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::Value;
use DashboardLibrary::web::api;
use common::*;

const BOUNDARY: &str = "----AquaBoundary7MA4YWxkTrZu0gW";

fn multipart_body(file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    test_image().write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png).unwrap();
    bytes
}

fn upload_request(file_name: &str, content: &[u8]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/upload")
        .insert_header((header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}")))
        .set_payload(multipart_body(file_name, content))
}

fn session_cookie(resp: &ServiceResponse) -> Cookie<'static> {
    resp.response().cookies()
        .find(|cookie| cookie.name() == "session_id")
        .map(|cookie| cookie.into_owned())
        .expect("response carries a session cookie")
}

struct Harness {
    _dir: tempfile::TempDir,
    uploads: std::path::PathBuf,
    status_board: Arc<StatusBoard>,
    files: web::Data<FileManager>,
    pipeline: web::Data<AnnotationPipeline>,
    sessions: web::Data<SessionStore>,
}

async fn harness(runtime: ModelRuntime) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("static/uploads");
    let results = dir.path().join("static/results");
    let files = FileManager::new(uploads.clone(), results.clone());
    files.initialize().await;
    let (pipeline, status_board) = build_pipeline(runtime, results);
    Harness {
        _dir: dir,
        uploads,
        status_board,
        files: web::Data::new(files),
        pipeline: web::Data::new(pipeline),
        sessions: web::Data::new(SessionStore::new(3600)),
    }
}

macro_rules! init_app {
    ($harness:expr) => {
        test::init_service(
            App::new()
                .app_data($harness.files.clone())
                .app_data($harness.pipeline.clone())
                .app_data($harness.sessions.clone())
                .app_data(web::Data::from($harness.status_board.clone()))
                .configure(api::configure),
        ).await
    };
}

fn trash_runtime() -> ModelRuntime {
    ModelRuntime::new(FakeDetector::empty("water_hyacinth"), FakeDetector::finding("rubbish", vec![trash_box(10, 10, 40, 40)]))
}

#[actix_web::test]
async fn upload_annotates_and_redirects_home() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, upload_request("photo.png", &png_bytes()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = session_cookie(&resp);
    assert!(harness.uploads.join("photo.png").is_file());

    let req = test::TestRequest::get().uri("/dashboard/state").cookie(cookie.clone()).to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["image_url"], "/media/results/pred_photo.png");
    assert_eq!(state["status"]["trash_count"], 13);
    assert_eq!(state["status"]["battery"], 92);
    assert_eq!(state["language"], "en");

    let req = test::TestRequest::get().uri("/media/results/pred_photo.png").to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn degraded_mode_shows_the_raw_upload() {
    let harness = harness(ModelRuntime::Unavailable("Models not found".to_string())).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, upload_request("photo.png", &png_bytes()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/dashboard/state").cookie(cookie).to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["image_url"], "/media/uploads/photo.png");
    assert_eq!(state["status"]["trash_count"], 12);

    let req = test::TestRequest::get().uri("/media/uploads/photo.png").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unsupported_extension_is_rejected() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, upload_request("weights.pt", b"not an image").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(!harness.uploads.join("weights.pt").exists());
    assert_eq!(harness.status_board.trash_count(), 12);
}

#[actix_web::test]
async fn truncated_multipart_is_rejected() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);
    let body = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo.png\"\r\n");

    let req = test::TestRequest::post()
        .uri("/upload")
        .insert_header((header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}")))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(std::fs::read_dir(&harness.uploads).unwrap().count(), 0);
}

#[actix_web::test]
async fn empty_file_name_redirects_home() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, upload_request("", b"").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    assert_eq!(std::fs::read_dir(&harness.uploads).unwrap().count(), 0);
}

#[actix_web::test]
async fn fresh_session_has_no_result() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/dashboard/state").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let _ = session_cookie(&resp);
    let state: Value = test::read_body_json(resp).await;
    assert_eq!(state["image_url"], Value::Null);
    assert_eq!(state["translation"]["title"], "AQUA-R");
}

#[actix_web::test]
async fn language_switch_is_remembered_per_session() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/language/ar").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/dashboard/state").cookie(cookie).to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["language"], "ar");
    assert_eq!(state["translation"]["dir"], "rtl");

    let req = test::TestRequest::get().uri("/dashboard/state").to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["translation"]["dir"], "ltr");
}

#[actix_web::test]
async fn unknown_language_is_rejected() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/language/de").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn media_rejects_traversal_and_missing_files() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);
    std::fs::write(harness.uploads.parent().unwrap().join("secret.txt"), "secret").unwrap();

    let req = test::TestRequest::get().uri("/media/uploads/..%2Fsecret.txt").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/media/results/pred_nothing.png").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn dashboard_page_and_script_are_embedded() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("/javascript/dashboard.js"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/javascript/dashboard.js").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn system_log_is_plain_text() {
    let harness = harness(trash_runtime()).await;
    let app = init_app!(harness);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/log/system_log").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Online now"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/log/system_log/since/yesterday").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
