use serde::{Deserialize, Serialize};

/// Mock telemetry shown on the dashboard.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeviceStatus {
    pub battery: u8, //percent
    pub status: String,
    pub lat: f64,
    pub lng: f64,
    pub trash_count: u64,
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self {
            battery: 92,
            status: "Ready".to_string(),
            lat: 30.0444,
            lng: 31.2357,
            trash_count: 12,
        }
    }
}
