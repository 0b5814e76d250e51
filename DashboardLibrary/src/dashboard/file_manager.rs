use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use futures::StreamExt;
use actix_multipart::Field;
use sanitize_filename::sanitize;
use crate::utils::logging::*;

pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

/// Owns the upload and results folders.
pub struct FileManager {
    upload_folder: PathBuf,
    results_folder: PathBuf,
}

impl FileManager {
    pub fn new(upload_folder: PathBuf, results_folder: PathBuf) -> Self {
        Self {
            upload_folder,
            results_folder,
        }
    }

    pub fn upload_folder(&self) -> &Path {
        &self.upload_folder
    }

    pub fn results_folder(&self) -> &Path {
        &self.results_folder
    }

    pub async fn initialize(&self) {
        logging_information!(SystemEntry::Initializing);
        for folder in [&self.upload_folder, &self.results_folder] {
            if let Err(err) = fs::create_dir_all(folder).await {
                logging_critical!(IOEntry::CreateDirectoryError(folder.display(), err));
            }
        }
        logging_information!(SystemEntry::InitializeComplete);
    }

    /// Returns `None` when nothing usable is left after sanitizing.
    pub fn sanitize_file_name(file_name: &str) -> Option<String> {
        let sanitized = sanitize(file_name);
        if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
            None
        } else {
            Some(sanitized)
        }
    }

    pub fn is_supported(file_name: &str) -> bool {
        Path::new(file_name).extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| SUPPORTED_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    pub fn upload_path(&self, file_name: &str) -> Option<PathBuf> {
        Self::sanitize_file_name(file_name).map(|file_name| self.upload_folder.join(file_name))
    }

    pub fn result_path(&self, file_name: &str) -> Option<PathBuf> {
        Self::sanitize_file_name(file_name).map(|file_name| self.results_folder.join(file_name))
    }

    /// Streams a multipart field into the upload folder, replacing any
    /// earlier upload of the same name.
    pub async fn save_field(&self, field: &mut Field, file_name: &str) -> Result<PathBuf, LogEntry> {
        let file_path = self.upload_path(file_name)
            .ok_or(error_entry!(WebEntry::InvalidPayload))?;
        let mut file = File::create(&file_path).await
            .map_err(|err| error_entry!(IOEntry::CreateFileError(file_path.display(), err)))?;
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|err| error_entry!(WebEntry::InvalidPayload, err.to_string()))?;
            file.write_all(&data).await
                .map_err(|err| error_entry!(IOEntry::WriteFileError(file_path.display(), err)))?;
        }
        file.flush().await
            .map_err(|err| error_entry!(IOEntry::WriteFileError(file_path.display(), err)))?;
        Ok(file_path)
    }
}
