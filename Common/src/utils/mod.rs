pub mod log_entry;
pub mod logging;
