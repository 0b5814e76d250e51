use image::DynamicImage;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::dashboard::utils::bounding_box::BoundingBox;
use crate::dashboard::ultralytics_detector::UltralyticsDetector;

/// A pretrained object detector.
///
/// Implementations return every region scoring at least `confidence`.
pub trait Detector: Send + Sync {
    fn detect(&self, image: &DynamicImage, confidence: f32) -> Result<Vec<BoundingBox>, LogEntry>;

    fn name(&self) -> &str;
}

/// The detector pair the annotation pipeline needs, or the reason it is
/// missing.
pub enum ModelRuntime {
    Available {
        water: Box<dyn Detector>,
        rubbish: Box<dyn Detector>,
    },
    Unavailable(String),
}

impl ModelRuntime {
    pub fn new(water: Box<dyn Detector>, rubbish: Box<dyn Detector>) -> Self {
        ModelRuntime::Available { water, rubbish }
    }

    pub fn load(config: &Config) -> Result<Self, LogEntry> {
        let water = UltralyticsDetector::new("water_hyacinth", &config.python_interpreter, &config.inference_script, &config.water_model_path)?;
        let rubbish = UltralyticsDetector::new("rubbish", &config.python_interpreter, &config.inference_script, &config.rubbish_model_path)?;
        Ok(Self::new(Box::new(water), Box::new(rubbish)))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModelRuntime::Available { .. })
    }
}
