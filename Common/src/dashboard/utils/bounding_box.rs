use serde::{Deserialize, Serialize};

/// Axis-aligned detection region in pixel coordinates, `min` inclusive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub xmin: u32,
    pub ymin: u32,
    pub xmax: u32,
    pub ymax: u32,
    pub name: String,
    pub confidence: f64,
}

impl BoundingBox {
    pub fn new<T: Into<String>>(xmin: u32, ymin: u32, xmax: u32, ymax: u32, name: T, confidence: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            name: name.into(),
            confidence,
        }
    }

    /// Builds a box from floating corner coordinates the way detectors emit
    /// them. Coordinates are truncated and negative values are clamped to 0.
    pub fn from_xyxy<T: Into<String>>(xyxy: [f64; 4], name: T, confidence: f64) -> Self {
        let [x1, y1, x2, y2] = xyxy.map(|value| value.max(0.0) as u32);
        Self::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2), name, confidence)
    }

    pub fn width(&self) -> u32 {
        self.xmax.saturating_sub(self.xmin)
    }

    pub fn height(&self) -> u32 {
        self.ymax.saturating_sub(self.ymin)
    }
}
