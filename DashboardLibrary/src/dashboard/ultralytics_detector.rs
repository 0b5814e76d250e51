use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use image::{DynamicImage, ImageFormat};
use serde::Deserialize;
use crate::utils::logging::*;
use crate::dashboard::model_runtime::Detector;
use crate::dashboard::utils::bounding_box::BoundingBox;

/// Runs an Ultralytics YOLO model through the inference script.
///
/// The script receives the model path and confidence as arguments, the image
/// as PNG on stdin, and prints a JSON array of detections on stdout.
pub struct UltralyticsDetector {
    name: String,
    python: String,
    script: PathBuf,
    model: PathBuf,
}

#[derive(Deserialize)]
struct RawDetection {
    xyxy: [f64; 4],
    name: String,
    confidence: f64,
}

impl UltralyticsDetector {
    pub fn new<T: Into<String>>(name: T, python: &str, script: &Path, model: &Path) -> Result<Self, LogEntry> {
        if !model.is_file() {
            return Err(notice_entry!(DetectionEntry::ModelNotFound(model.display())));
        }
        if !script.is_file() {
            return Err(notice_entry!(DetectionEntry::ScriptNotFound(script.display())));
        }
        Ok(Self {
            name: name.into(),
            python: python.to_string(),
            script: script.to_path_buf(),
            model: model.to_path_buf(),
        })
    }

    fn run_script(&self, encoded: Vec<u8>, confidence: f32) -> Result<Vec<u8>, LogEntry> {
        let mut process = Command::new(&self.python)
            .arg(&self.script)
            .arg(&self.model)
            .arg(confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| error_entry!(DetectionEntry::ChildProcessError(err.to_string())))?;
        let mut stdin = process.stdin.take()
            .ok_or(error_entry!(DetectionEntry::ChildProcessError("stdin unavailable".to_string())))?;
        // stdin is fed while stdout and stderr are drained.
        let writer = thread::spawn(move || stdin.write_all(&encoded));
        let output = process.wait_with_output()
            .map_err(|err| error_entry!(DetectionEntry::ChildProcessError(err.to_string())))?;
        let written = writer.join();
        // Exit status takes precedence over a broken stdin pipe.
        if !output.status.success() {
            let err = format!("Process exit with code: {}", output.status.code().unwrap_or(-1));
            return Err(error_entry!(DetectionEntry::ChildProcessError(err), String::from_utf8_lossy(&output.stderr)));
        }
        match written {
            Ok(Ok(())) => Ok(output.stdout),
            Ok(Err(err)) => Err(error_entry!(DetectionEntry::ChildProcessError(err.to_string()), String::from_utf8_lossy(&output.stderr))),
            Err(_) => Err(error_entry!(DetectionEntry::ChildProcessError("stdin writer panicked".to_string()))),
        }
    }
}

impl Detector for UltralyticsDetector {
    fn detect(&self, image: &DynamicImage, confidence: f32) -> Result<Vec<BoundingBox>, LogEntry> {
        let mut encoded = Vec::new();
        image.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .map_err(|err| error_entry!(DetectionEntry::ImageEncodeError(err)))?;
        let stdout = self.run_script(encoded, confidence)?;
        parse_detections(&stdout)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn parse_detections(stdout: &[u8]) -> Result<Vec<BoundingBox>, LogEntry> {
    let detections: Vec<RawDetection> = serde_json::from_slice(stdout)
        .map_err(|err| error_entry!(DetectionEntry::InferenceOutputError(err)))?;
    Ok(detections.into_iter()
        .map(|detection| BoundingBox::from_xyxy(detection.xyxy, detection.name, detection.confidence))
        .collect())
}
