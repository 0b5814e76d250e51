use std::sync::atomic::{AtomicU64, Ordering};
use crate::dashboard::utils::device_status::DeviceStatus;

/// Owner of the device status record.
///
/// Everything but the trash counter is fixed at construction. The counter
/// only ever grows.
pub struct StatusBoard {
    battery: u8,
    status: String,
    lat: f64,
    lng: f64,
    trash_count: AtomicU64,
}

impl StatusBoard {
    pub fn new(initial: DeviceStatus) -> Self {
        Self {
            battery: initial.battery,
            status: initial.status,
            lat: initial.lat,
            lng: initial.lng,
            trash_count: AtomicU64::new(initial.trash_count),
        }
    }

    /// Adds `count` detected trash regions and returns the new total.
    pub fn record_trash(&self, count: u64) -> u64 {
        self.trash_count.fetch_add(count, Ordering::SeqCst) + count
    }

    pub fn trash_count(&self) -> u64 {
        self.trash_count.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> DeviceStatus {
        DeviceStatus {
            battery: self.battery,
            status: self.status.clone(),
            lat: self.lat,
            lng: self.lng,
            trash_count: self.trash_count(),
        }
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new(DeviceStatus::default())
    }
}
