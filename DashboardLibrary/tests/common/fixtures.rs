use std::path::{Path, PathBuf};
use std::sync::Arc;
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use DashboardLibrary::utils::logging::*;
use super::*;

/// Detector replaying a fixed outcome for every image.
pub struct FakeDetector {
    name: String,
    outcome: Result<Vec<BoundingBox>, String>,
}

impl FakeDetector {
    pub fn finding(name: &str, boxes: Vec<BoundingBox>) -> Box<dyn Detector> {
        Box::new(Self {
            name: name.to_string(),
            outcome: Ok(boxes),
        })
    }

    pub fn empty(name: &str) -> Box<dyn Detector> {
        Self::finding(name, Vec::new())
    }

    pub fn failing(name: &str, message: &str) -> Box<dyn Detector> {
        Box::new(Self {
            name: name.to_string(),
            outcome: Err(message.to_string()),
        })
    }
}

impl Detector for FakeDetector {
    fn detect(&self, _image: &DynamicImage, _confidence: f32) -> Result<Vec<BoundingBox>, LogEntry> {
        self.outcome.clone().map_err(|message| error_entry!(message))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn trash_box(xmin: u32, ymin: u32, xmax: u32, ymax: u32) -> BoundingBox {
    BoundingBox::new(xmin, ymin, xmax, ymax, "bottle", 0.8)
}

pub fn plant_box(xmin: u32, ymin: u32, xmax: u32, ymax: u32) -> BoundingBox {
    BoundingBox::new(xmin, ymin, xmax, ymax, "water_hyacinth", 0.9)
}

/// A 64x64 gradient with no pure red or green pixels.
pub fn test_image() -> RgbImage {
    ImageBuffer::from_fn(64, 64, |x, y| Rgb([(x * 2) as u8, (y * 2) as u8, 128u8]))
}

pub fn write_black_image(dir: &Path, file_name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(file_name);
    RgbImage::new(width, height).save(&path).expect("Failed to save test image");
    path
}

pub fn write_image(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    test_image().save(&path).expect("Failed to save test image");
    path
}

pub fn results_folder(dir: &Path) -> PathBuf {
    let results = dir.join("results");
    std::fs::create_dir_all(&results).expect("Failed to create results folder");
    results
}

pub fn build_pipeline(runtime: ModelRuntime, results: PathBuf) -> (AnnotationPipeline, Arc<StatusBoard>) {
    build_styled_pipeline(runtime, results, AnnotationStyle::new(3, 18.0, None))
}

/// Pipeline drawing labels with the embedded font.
pub fn build_labelled_pipeline(runtime: ModelRuntime, results: PathBuf) -> (AnnotationPipeline, Arc<StatusBoard>) {
    let font = AnnotationStyle::embedded_font().expect("Embedded font must load");
    build_styled_pipeline(runtime, results, AnnotationStyle::new(3, LABEL_SIZE, Some(font)))
}

pub const LABEL_SIZE: f32 = 18.0;

fn build_styled_pipeline(runtime: ModelRuntime, results: PathBuf, style: AnnotationStyle) -> (AnnotationPipeline, Arc<StatusBoard>) {
    let status_board = Arc::new(StatusBoard::default());
    let pipeline = AnnotationPipeline::new(runtime, status_board.clone(), results, 0.25, style);
    (pipeline, status_board)
}
