use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebEntry {
    #[error("Invalid payload")]
    InvalidPayload,
    #[error("Unsupported file type {0}")]
    UnsupportedFileType(String),
    #[error("Unknown language {0}")]
    UnknownLanguage(String),
    #[error("Static file {0} not found")]
    StaticFileNotFound(String),
    #[error("Invalid datetime format")]
    InvalidDatetime,
}

impl From<WebEntry> for String {
    #[inline(always)]
    fn from(value: WebEntry) -> Self {
        value.to_string()
    }
}
