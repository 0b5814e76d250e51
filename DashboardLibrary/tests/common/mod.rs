#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

pub use DashboardLibrary::dashboard::annotation_pipeline::{Annotation, AnnotationPipeline, AnnotationStyle, FallbackReason};
pub use DashboardLibrary::dashboard::file_manager::FileManager;
pub use DashboardLibrary::dashboard::model_runtime::{Detector, ModelRuntime};
pub use DashboardLibrary::dashboard::session_store::SessionStore;
pub use DashboardLibrary::dashboard::status_board::StatusBoard;
pub use DashboardLibrary::dashboard::utils::bounding_box::BoundingBox;
