pub mod annotation_pipeline;
pub mod dashboard;
pub mod file_manager;
pub mod model_runtime;
pub mod session_store;
pub mod status_board;
pub mod ultralytics_detector;

pub use Common::dashboard::utils;
