use std::io::Error as IoError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum SystemEntry {
    #[error("Online now")]
    Online,
    #[error("Initializing")]
    Initializing,
    #[error("Initialization completed")]
    InitializeComplete,
    #[error("Termination in process")]
    Terminating,
    #[error("Termination completed")]
    TerminateComplete,
    #[error("Invalid configuration")]
    InvalidConfig,
    #[error("Configuration not found, using built-in defaults")]
    ConfigNotFound,
    #[error("Ignoring invalid PORT value {0}")]
    InvalidPortOverride(String),
    #[error("Web service ready on port {0}")]
    WebReady(u16),
    #[error("Failed to bind port {0}: {1}")]
    BindPortError(u16, IoError),
    #[error("Web service panic: {0}")]
    WebPanic(IoError),
    #[error("Purged {0} expired sessions")]
    SessionPurged(usize),
    #[error("Task panic while execution: {0}")]
    TaskPanickedError(JoinError),
}

impl From<SystemEntry> for String {
    #[inline(always)]
    fn from(value: SystemEntry) -> Self {
        value.to_string()
    }
}
