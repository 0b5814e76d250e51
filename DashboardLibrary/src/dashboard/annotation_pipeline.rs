use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use crate::utils::config::Config;
use crate::utils::static_files::StaticFiles;
use crate::utils::logging::*;
use crate::dashboard::model_runtime::{Detector, ModelRuntime};
use crate::dashboard::status_board::StatusBoard;
use crate::dashboard::utils::bounding_box::BoundingBox;
use crate::dashboard::utils::detection_class::DetectionClass;

pub const RESULT_PREFIX: &str = "pred_";
pub const LABEL_OFFSET: i32 = 10;
pub const EMBEDDED_FONT: &str = "font/DejaVuSans.ttf";

pub struct AnnotationStyle {
    pub border_width: u32,
    pub font_size: f32,
    pub font: Option<FontVec>,
}

impl AnnotationStyle {
    /// Style without a font draws boxes only.
    pub fn new(border_width: u32, font_size: f32, font: Option<FontVec>) -> Self {
        Self {
            border_width,
            font_size,
            font,
        }
    }

    /// Uses `font_path` when configured, the embedded font otherwise.
    pub fn load(config: &Config) -> Result<Self, LogEntry> {
        let font = match &config.font_path {
            Some(font_path) => Self::read_font(font_path)?,
            None => Self::embedded_font()?,
        };
        Ok(Self::new(config.border_width, config.font_size, Some(font)))
    }

    pub fn embedded_font() -> Result<FontVec, LogEntry> {
        let font_path = Path::new(EMBEDDED_FONT);
        let font_data = StaticFiles::get(EMBEDDED_FONT)
            .ok_or(error_entry!(WebEntry::StaticFileNotFound(EMBEDDED_FONT.to_string())))?
            .data
            .into_owned();
        FontVec::try_from_vec(font_data)
            .map_err(|_| error_entry!(DetectionEntry::FontParseError(font_path.display())))
    }

    fn read_font(font_path: &Path) -> Result<FontVec, LogEntry> {
        let font_data = fs::read(font_path)
            .map_err(|err| error_entry!(IOEntry::ReadFileError(font_path.display(), err)))?;
        FontVec::try_from_vec(font_data)
            .map_err(|_| error_entry!(DetectionEntry::FontParseError(font_path.display())))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    ModelsUnavailable,
    ImageDecodeFailure(String),
    DetectorFailure(String),
}

/// Outcome of one `annotate` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Annotated {
        file_name: String,
        water_hyacinth: usize,
        trash: usize,
    },
    Fallback {
        path: String,
        reason: FallbackReason,
    },
}

impl Annotation {
    /// The reference handed back to callers: the result file name, or the
    /// untouched input path in degraded mode.
    pub fn into_reference(self) -> String {
        match self {
            Annotation::Annotated { file_name, .. } => file_name,
            Annotation::Fallback { path, .. } => path,
        }
    }
}

pub struct AnnotationPipeline {
    runtime: ModelRuntime,
    status_board: Arc<StatusBoard>,
    results_folder: PathBuf,
    confidence: f32,
    style: AnnotationStyle,
}

impl AnnotationPipeline {
    pub fn new(runtime: ModelRuntime, status_board: Arc<StatusBoard>, results_folder: PathBuf, confidence: f32, style: AnnotationStyle) -> Self {
        Self {
            runtime,
            status_board,
            results_folder,
            confidence,
            style,
        }
    }

    pub fn is_available(&self) -> bool {
        self.runtime.is_available()
    }

    /// Annotates the image at `image_path` and returns the result file name,
    /// or `image_path` itself when the models are unavailable or the image
    /// cannot be read.
    ///
    /// Only a failure to write the annotated image is an error.
    pub fn process_image(&self, image_path: &Path) -> Result<String, LogEntry> {
        self.annotate(image_path).map(Annotation::into_reference)
    }

    pub fn annotate(&self, image_path: &Path) -> Result<Annotation, LogEntry> {
        let fallback = |reason| Annotation::Fallback {
            path: image_path.to_string_lossy().to_string(),
            reason,
        };
        let (water, rubbish) = match &self.runtime {
            ModelRuntime::Available { water, rubbish } => (water, rubbish),
            ModelRuntime::Unavailable(_) => return Ok(fallback(FallbackReason::ModelsUnavailable)),
        };
        let file_name = match image_path.file_name().and_then(|name| name.to_str()) {
            Some(file_name) => file_name.to_string(),
            None => return Ok(fallback(FallbackReason::ImageDecodeFailure(image_path.display().to_string()))),
        };
        let image = match Self::decode(image_path) {
            Ok(image) => image,
            Err(entry) => return Ok(fallback(FallbackReason::ImageDecodeFailure(entry.message))),
        };
        let plants = match self.detect(&**water, &image) {
            Ok(boxes) => boxes,
            Err(entry) => return Ok(fallback(FallbackReason::DetectorFailure(entry.message))),
        };
        let trash = match self.detect(&**rubbish, &image) {
            Ok(boxes) => boxes,
            Err(entry) => return Ok(fallback(FallbackReason::DetectorFailure(entry.message))),
        };
        let mut canvas = image.to_rgb8();
        self.draw_detections(&mut canvas, &plants, DetectionClass::WaterHyacinth);
        self.draw_detections(&mut canvas, &trash, DetectionClass::Trash);
        self.status_board.record_trash(trash.len() as u64);
        let result_name = format!("{RESULT_PREFIX}{file_name}");
        let result_path = self.results_folder.join(&result_name);
        canvas.save(&result_path)
            .map_err(|err| error_entry!(DetectionEntry::ImageSaveError(result_path.display(), err)))?;
        Ok(Annotation::Annotated {
            file_name: result_name,
            water_hyacinth: plants.len(),
            trash: trash.len(),
        })
    }

    fn decode(image_path: &Path) -> Result<DynamicImage, LogEntry> {
        ImageReader::open(image_path)
            .map_err(|err| notice_entry!(DetectionEntry::ImageOpenError(image_path.display(), err)))?
            .with_guessed_format()
            .map_err(|err| notice_entry!(DetectionEntry::ImageOpenError(image_path.display(), err)))?
            .decode()
            .map_err(|err| notice_entry!(DetectionEntry::ImageDecodeError(image_path.display(), err)))
    }

    fn detect(&self, detector: &dyn Detector, image: &DynamicImage) -> Result<Vec<BoundingBox>, LogEntry> {
        detector.detect(image, self.confidence)
            .map_err(|entry| error_entry!(DetectionEntry::DetectorError(detector.name().to_string(), entry.message), entry.debug_info))
    }

    fn draw_detections(&self, canvas: &mut RgbImage, boxes: &[BoundingBox], class: DetectionClass) {
        let color = Rgb(class.color());
        let (max_x, max_y) = (canvas.width().saturating_sub(1), canvas.height().saturating_sub(1));
        for bounding_box in boxes {
            // Detector coordinates may run past the canvas.
            let (xmin, xmax) = (bounding_box.xmin.min(max_x), bounding_box.xmax.min(max_x));
            let (ymin, ymax) = (bounding_box.ymin.min(max_y), bounding_box.ymax.min(max_y));
            let left = xmin as i32;
            let top = ymin as i32;
            let width = (xmax - xmin).max(1);
            let height = (ymax - ymin).max(1);
            for i in 0..self.style.border_width {
                let offset_rect = Rect::at(left - i as i32, top - i as i32).of_size(width + 2 * i, height + 2 * i);
                draw_hollow_rect_mut(canvas, offset_rect, color);
            }
            if let Some(font) = &self.style.font {
                let scale = PxScale::from(self.style.font_size);
                let (_, text_height) = text_size(scale, font, class.label());
                let position_y = (top - LABEL_OFFSET - text_height as i32).max(0);
                draw_text_mut(canvas, color, left, position_y, scale, font, class.label());
            }
        }
    }
}
