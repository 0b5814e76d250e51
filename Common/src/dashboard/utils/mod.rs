pub mod bounding_box;
pub mod detection_class;
pub mod device_status;
pub mod language;
