use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use lazy_static::lazy_static;
use actix_web::{web, App, HttpServer};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::dashboard::annotation_pipeline::{AnnotationPipeline, AnnotationStyle};
use crate::dashboard::file_manager::FileManager;
use crate::dashboard::model_runtime::ModelRuntime;
use crate::dashboard::session_store::SessionStore;
use crate::dashboard::status_board::StatusBoard;
use crate::web::api;

lazy_static! {
    static ref DASHBOARD: RwLock<Dashboard> = RwLock::new(Dashboard::new());
}

pub struct Dashboard {
    terminate: bool,
}

impl Dashboard {
    fn new() -> Self {
        Self {
            terminate: false,
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        DASHBOARD.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        DASHBOARD.write().await
    }

    pub async fn run() {
        let config = Config::now().await;
        let files = FileManager::new(config.upload_folder.clone(), config.results_folder.clone());
        files.initialize().await;
        let runtime = Self::load_models(&config).await;
        let style = match AnnotationStyle::load(&config) {
            Ok(style) => style,
            Err(entry) => {
                logging_entry!(entry);
                let font = match AnnotationStyle::embedded_font() {
                    Ok(font) => Some(font),
                    Err(entry) => {
                        logging_entry!(entry);
                        None
                    }
                };
                AnnotationStyle::new(config.border_width, config.font_size, font)
            }
        };
        let status_board = Arc::new(StatusBoard::default());
        let pipeline = web::Data::new(AnnotationPipeline::new(runtime, status_board.clone(), config.results_folder.clone(), config.confidence, style));
        let sessions = web::Data::new(SessionStore::new(config.session_lifetime));
        let files = web::Data::new(files);
        let status_board = web::Data::from(status_board);
        Self::purge_sessions(sessions.clone().into_inner(), config.purge_interval);
        let http_server = loop {
            let (pipeline, sessions, files, status_board) = (pipeline.clone(), sessions.clone(), files.clone(), status_board.clone());
            let http_server = HttpServer::new(move || {
                App::new()
                    .app_data(pipeline.clone())
                    .app_data(sessions.clone())
                    .app_data(files.clone())
                    .app_data(status_board.clone())
                    .configure(api::configure)
            }).bind(("0.0.0.0", config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!(SystemEntry::BindPortError(config.http_server_bind_port, err));
                    sleep(Duration::from_secs(config.bind_retry_duration)).await;
                    continue;
                }
            }
        };
        logging_information!(SystemEntry::WebReady(config.http_server_bind_port));
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!(SystemEntry::WebPanic(err));
        }
    }

    pub async fn terminate() {
        logging_information!(SystemEntry::Terminating);
        Self::instance_mut().await.terminate = true;
        logging_information!(SystemEntry::TerminateComplete);
    }

    async fn load_models(config: &Config) -> ModelRuntime {
        match ModelRuntime::load(config) {
            Ok(runtime) => {
                logging_information!(DetectionEntry::ModelsLoaded);
                runtime
            }
            Err(entry) => {
                let reason = entry.message.clone();
                logging_entry!(entry);
                ModelRuntime::Unavailable(reason)
            }
        }
    }

    fn purge_sessions(sessions: Arc<SessionStore>, purge_interval: u64) {
        tokio::spawn(async move {
            while !Self::instance().await.terminate {
                sleep(Duration::from_secs(purge_interval)).await;
                let purged = sessions.purge_expired().await;
                if purged > 0 {
                    logging_debug!(SystemEntry::SessionPurged(purged));
                }
            }
        });
    }
}
