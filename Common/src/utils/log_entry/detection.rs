use image::ImageError;
use serde_json::error::Error as SerdeJsonError;
use std::io::Error as IoError;
use std::path::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionEntry<'a> {
    #[error("Models loaded")]
    ModelsLoaded,
    #[error("Models not found: {0}")]
    ModelNotFound(Display<'a>),
    #[error("Inference script not found: {0}")]
    ScriptNotFound(Display<'a>),
    #[error("Failed to decode image {0}: {1}")]
    ImageDecodeError(Display<'a>, ImageError),
    #[error("Failed to open image {0}: {1}")]
    ImageOpenError(Display<'a>, IoError),
    #[error("Failed to encode image for inference: {0}")]
    ImageEncodeError(ImageError),
    #[error("Failed to save annotated image {0}: {1}")]
    ImageSaveError(Display<'a>, ImageError),
    #[error("Failed to load font {0}")]
    FontParseError(Display<'a>),
    #[error("Detector {0} failed: {1}")]
    DetectorError(String, String),
    #[error("Child process execution error: {0}")]
    ChildProcessError(String),
    #[error("Unable to parse inference output: {0}")]
    InferenceOutputError(SerdeJsonError),
    #[error("Annotated {0}: {1} water hyacinth, {2} trash")]
    Annotated(String, usize, usize),
}

impl From<DetectionEntry<'_>> for String {
    #[inline(always)]
    fn from(value: DetectionEntry) -> Self {
        value.to_string()
    }
}
